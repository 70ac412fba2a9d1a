mod utils;

use serde_json::{json, Value};
use std::collections::HashSet;
use tokio::time::Duration;

use unmask::{
    game::{GamePhase, SquadPhase},
    websockets::MessageType,
};
use utils::{TestSetup, TestSetupBuilder, MODERATOR};

async fn squad_phase(setup: &TestSetup, squad_id: &str) -> SquadPhase {
    let squad = setup.coordinator.squad(squad_id).await.unwrap();
    let phase = squad.lock().await.phase();
    phase
}

/// Hold the tumbler with every member until the vault cracks
async fn crack_tumbler(setup: &TestSetup, members: &[String]) {
    for _ in 0..10 {
        for member in members {
            let ack = setup.tumbler(member, true).await;
            if ack["complete"] == true {
                return;
            }
        }
        tokio::time::advance(Duration::from_millis(500)).await;
    }
    panic!("tumbler never cracked");
}

/// Run one squad from a closed loop to the finish line
async fn run_heist(setup: &TestSetup, squad_id: &str) -> Vec<String> {
    let members = setup.squad_order(squad_id).await;
    let secret = setup.secret_index(squad_id).await as i64;

    let miss = setup.guess(&members[0], (secret + 1) % 9).await;
    assert_eq!(miss["success"], false);
    assert_eq!(miss["result"], "wrong_symbol");
    assert_eq!(miss["tries_left"], 8);
    assert_eq!(miss["max_tries"], 9);

    let hit = setup.guess(&members[1], secret).await;
    assert_eq!(hit["success"], true);
    assert_eq!(hit["progress"], 25);

    crack_tumbler(setup, &members).await;
    assert_eq!(squad_phase(setup, squad_id).await, SquadPhase::Getaway);

    let mut positions = HashSet::new();
    for member in &members {
        let fragment = setup
            .player_request(member, MessageType::GetFragment, json!({}))
            .await;
        assert_eq!(fragment["code_length"], 6);
        positions.insert(fragment["position"].as_u64().unwrap());

        let again = setup
            .player_request(member, MessageType::GetFragment, json!({}))
            .await;
        assert_eq!(again["position"], fragment["position"]);
    }
    assert_eq!(positions.len(), members.len());

    let code = setup.getaway_code(squad_id).await;
    let mut transposed: Vec<char> = code.chars().collect();
    transposed.swap(0, 1);
    let transposed: String = transposed.into_iter().collect();
    if transposed != code {
        let wrong = setup.verify_code(&members[2], &transposed).await;
        assert_eq!(wrong["success"], false);
    }

    let right = setup.verify_code(&members[2], &code.to_lowercase()).await;
    assert_eq!(right["success"], true);
    assert_eq!(squad_phase(setup, squad_id).await, SquadPhase::Complete);

    members
}

#[tokio::test(start_paused = true)]
async fn test_six_players_two_squads_full_game() {
    let setup = TestSetupBuilder::new()
        .with_player_count(6)
        .registered()
        .build()
        .await;

    // Moderator configures and checks the lobby
    let ack = setup
        .moderator_request(MessageType::SetTeamSize, json!({ "size": 3 }))
        .await;
    assert_eq!(ack["team_size"], 3);

    let state = setup
        .moderator_request(MessageType::GetGameState, json!({}))
        .await;
    assert_eq!(state["can_start"]["valid"], true);
    assert_eq!(state["state"]["player_count"], 6);

    // Formation
    let ack = setup.start_chain().await;
    assert_eq!(ack["success"], true, "{ack}");
    assert!(setup.has_event("p0", "phase_change").await);

    let squad_ids = setup.coordinator.squad_ids().await;
    assert_eq!(squad_ids.len(), 2);

    let mut everyone = HashSet::new();
    for squad_id in &squad_ids {
        let order = setup.squad_order(squad_id).await;
        assert_eq!(order.len(), 3);
        everyone.extend(order);
    }
    let registered: HashSet<String> = setup.players.iter().cloned().collect();
    assert_eq!(everyone, registered);

    let (first, second) = (&squad_ids[0], &squad_ids[1]);
    let first_members = setup.squad_order(first).await;
    let second_members = setup.squad_order(second).await;

    // Targets follow the roster order
    let target = setup
        .player_request(&first_members[0], MessageType::GetTarget, json!({}))
        .await;
    assert_eq!(
        target["target"]["identifying_info"],
        format!("sketch of {}", first_members[1])
    );

    // First squad closes its loop; the second is unaffected
    setup.clear_messages().await;
    let last = setup.complete_loop(first).await;
    assert_eq!(last["loop_complete"], true);
    assert_eq!(last["squad_id"], first.as_str());

    assert_eq!(squad_phase(&setup, first).await, SquadPhase::Heist);
    assert_eq!(squad_phase(&setup, second).await, SquadPhase::Chain);
    for member in &first_members {
        assert!(setup.has_event(member, "squad_activated").await);
    }
    for member in &second_members {
        assert!(!setup.has_event(member, "squad_activated").await);
    }
    assert!(setup.has_event(MODERATOR, "squad_loop_complete").await);

    let info = setup
        .player_request(&first_members[0], MessageType::GetSquadInfo, json!({}))
        .await;
    assert_eq!(info["team_size"], 3);
    assert_eq!(info["max_tries"], 9);
    assert_eq!(info["code_length"], 6);

    // First squad finishes while the second is still scanning
    run_heist(&setup, first).await;
    assert_eq!(squad_phase(&setup, second).await, SquadPhase::Chain);
    for member in &first_members {
        assert!(setup.has_event(member, "heist_complete").await);
    }

    // Second squad catches up and finishes second
    setup.complete_loop(second).await;
    run_heist(&setup, second).await;

    let snapshot = setup.coordinator.snapshot().await;
    let ranks: Vec<(String, Option<u32>)> = snapshot
        .squads
        .iter()
        .map(|s| (s.id.clone(), s.finish_rank))
        .collect();
    assert!(ranks.contains(&(first.clone(), Some(1))));
    assert!(ranks.contains(&(second.clone(), Some(2))));

    let completions: Vec<Value> = setup
        .events_for(MODERATOR)
        .await
        .into_iter()
        .filter(|e| e["event"] == "squad_completed")
        .collect();
    assert_eq!(completions.len(), 2);
    assert_eq!(completions[0]["squad_id"], first.as_str());
    assert_eq!(completions[0]["finish_rank"], 1);
}

#[tokio::test]
async fn test_global_heist_pulls_lagging_squads_forward() {
    let setup = TestSetupBuilder::new()
        .with_player_count(4)
        .with_team_size(2)
        .registered()
        .build()
        .await;

    setup.start_chain().await;
    let squad_ids = setup.coordinator.squad_ids().await;
    setup.complete_loop(&squad_ids[0]).await;
    let secret_before = setup.secret_index(&squad_ids[0]).await;

    let ack = setup
        .moderator_request(MessageType::StartHeist, json!({}))
        .await;
    assert_eq!(ack["success"], true, "{ack}");
    assert_eq!(setup.coordinator.phase().await, GamePhase::Heist);

    assert_eq!(setup.secret_index(&squad_ids[0]).await, secret_before);
    assert_eq!(squad_phase(&setup, &squad_ids[1]).await, SquadPhase::Heist);

    let lagging = setup.squad_order(&squad_ids[1]).await;
    let hit = setup
        .guess(&lagging[0], setup.secret_index(&squad_ids[1]).await as i64)
        .await;
    assert_eq!(hit["success"], true);
}

#[tokio::test]
async fn test_signal_jammer_budget_is_shared_by_the_squad() {
    let setup = TestSetupBuilder::new()
        .with_player_count(10)
        .with_team_size(10)
        .registered()
        .build()
        .await;

    setup.start_chain().await;
    let squad_id = setup.coordinator.squad_ids().await[0].clone();
    setup.complete_loop(&squad_id).await;

    let members = setup.squad_order(&squad_id).await;
    let wrong = (setup.secret_index(&squad_id).await as i64 + 1) % 9;

    for (i, member) in members.iter().take(3).enumerate() {
        let miss = setup.guess(member, wrong).await;
        assert_eq!(miss["tries_left"], 2 - i as i64);
    }

    let blocked = setup.guess(&members[5], wrong).await;
    assert_eq!(blocked["success"], false);
    assert_eq!(blocked["result"], "max_tries_exceeded");
    assert_eq!(blocked["max_tries"], 3);

    let errors = setup
        .events_for(MODERATOR)
        .await
        .into_iter()
        .filter(|e| e["event"] == "squad_error")
        .count();
    assert_eq!(errors, 4);
}

#[tokio::test]
async fn test_reset_returns_everyone_to_start() {
    let setup = TestSetupBuilder::new()
        .with_player_count(2)
        .with_team_size(2)
        .registered()
        .build()
        .await;
    setup.start_chain().await;

    let ack = setup
        .moderator_request(MessageType::ResetGame, json!({}))
        .await;
    assert_eq!(ack["success"], true);

    assert!(setup.has_event("p0", "game_reset").await);
    assert!(setup.has_event(MODERATOR, "game_reset").await);
    assert_eq!(setup.coordinator.phase().await, GamePhase::Start);
    assert_eq!(setup.coordinator.player_count().await, 0);

    // The same connections can register again
    let ack = setup.register("p0").await;
    assert_eq!(ack["success"], true);
}
