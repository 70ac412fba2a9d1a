// Public API
pub use coordinator::{
    AutoResolution, CoordinatorConfig, GuessResult, ScanResult, SessionCoordinator, SharedSquad,
    StartCheck, TumblerStatus, MAX_SQUAD_SIZE, MIN_SQUAD_SIZE,
};
pub use errors::GameError;
pub use events::{Audience, EventSink, GameEvent, Outbound, Outcome};
pub use phase::{GamePhase, Minigame, SquadPhase};
pub use player::{ConnId, Player, Registration, PROMPTS};
pub use snapshot::{GameSnapshot, SquadInfo, SquadStatus, Submission};
pub use squad::{Fragment, GuessOutcome, Squad, TargetInfo};
pub use sweeper::{start_timeout_sweeper, SweeperConfig};

// Internal modules
mod coordinator;
mod errors;
mod events;
mod phase;
mod player;
mod snapshot;
pub mod squad;
mod sweeper;
