//! End-to-end replay of a scripted half-inning through the full pipeline.

use bb_core::{
    Base, BaseOccupancy, EventType, GameProcessor, GameState, GroundTruth, Half, PlayerId,
    PlayerMap, RawEvent, RosterSnapshot, COLUMNS,
};

fn roster() -> PlayerMap {
    PlayerMap::from_pairs(vec![
        (PlayerId(100), "Mookie Betts".to_string()),
        (PlayerId(101), "Trea Turner".to_string()),
        (PlayerId(102), "Freddie Freeman".to_string()),
        (PlayerId(200), "Zack Wheeler".to_string()),
        (PlayerId(201), "Jose Alvarado".to_string()),
        (PlayerId(103), "Chris Taylor".to_string()),
    ])
}

fn event(event_type: &str, description: &str, at_bat: u32) -> RawEvent {
    RawEvent {
        event_type: EventType::from(event_type.to_string()),
        description: description.to_string(),
        score_update: None,
        outs_update: None,
        atbat_index: Some(at_bat),
    }
}

fn seeded_state() -> GameState {
    let snapshot = RosterSnapshot {
        home_lineup: [
            Some(PlayerId(100)),
            Some(PlayerId(101)),
            Some(PlayerId(102)),
            None,
            None,
            None,
            None,
            None,
            None,
        ],
        away_lineup: [None; 9],
        home_pitcher: None,
        away_pitcher: Some(PlayerId(200)),
        home_positions: Vec::new(),
        away_positions: Vec::new(),
    };
    GameState::from_roster("LAD", "PHI", &snapshot)
}

#[test]
fn test_half_inning_replay_emits_one_row_per_event() {
    let roster = roster();
    let mut truth = GroundTruth::new();
    truth.insert_first(1, Half::Bottom, 1, BaseOccupancy::default());
    truth.insert_first(
        1,
        Half::Bottom,
        2,
        BaseOccupancy {
            on_first: Some(PlayerId(100)),
            ..Default::default()
        },
    );
    truth.insert_first(
        1,
        Half::Bottom,
        3,
        BaseOccupancy {
            on_first: Some(PlayerId(101)),
            on_second: None,
            on_third: Some(PlayerId(100)),
        },
    );

    let mut processor = GameProcessor::new(seeded_state(), &roster, &truth);

    let events = [
        event("Single", "Mookie Betts singles.", 1),
        event("Stolen Base 2B", "Mookie Betts steals 2nd base.", 2),
        event(
            "Single",
            "Trea Turner singles. Mookie Betts to 3rd.",
            2,
        ),
        event(
            "Pitching Change",
            "Pitching Change: Jose Alvarado replaces Zack Wheeler.",
            3,
        ),
    ];
    for e in &events {
        processor.process_event(e, 1, Half::Bottom);
    }

    let log = processor.into_log();
    assert_eq!(log.len(), events.len());
    for row in log.rows() {
        assert_eq!(row.to_record().len(), COLUMNS.len());
        assert_eq!(row.half, Half::Bottom);
    }
}

#[test]
fn test_replay_tracks_bases_and_mound() {
    let roster = roster();
    let mut truth = GroundTruth::new();
    truth.insert_first(1, Half::Bottom, 1, BaseOccupancy::default());
    truth.insert_first(
        1,
        Half::Bottom,
        2,
        BaseOccupancy {
            on_second: Some(PlayerId(100)),
            ..Default::default()
        },
    );

    let mut processor = GameProcessor::new(seeded_state(), &roster, &truth);

    processor.process_event(&event("Single", "Mookie Betts singles.", 1), 1, Half::Bottom);
    assert_eq!(processor.state().bases.get(Base::First), Some(PlayerId(100)));

    processor.process_event(
        &event("Stolen Base 2B", "Mookie Betts steals 2nd base.", 2),
        1,
        Half::Bottom,
    );
    assert_eq!(processor.state().bases.get(Base::First), None);
    assert_eq!(processor.state().bases.get(Base::Second), Some(PlayerId(100)));

    processor.process_event(
        &event(
            "Pitching Substitution",
            "Pitching Change: Jose Alvarado replaces Zack Wheeler.",
            2,
        ),
        1,
        Half::Bottom,
    );
    assert_eq!(processor.state().away_pitcher, Some(PlayerId(201)));

    // The pitching change was labeled a decision, the hit was not.
    let log = processor.into_log();
    assert!(!log.get(0).unwrap().is_decision);
    assert!(log.get(2).unwrap().is_decision);
}

#[test]
fn test_pinch_runner_snapshot_keeps_outgoing_player() {
    let roster = roster();
    let mut truth = GroundTruth::new();
    truth.insert_first(1, Half::Bottom, 1, BaseOccupancy::default());
    // Ground truth for the substitution at-bat already lists the incoming
    // runner on second.
    truth.insert_first(
        1,
        Half::Bottom,
        2,
        BaseOccupancy {
            on_second: Some(PlayerId(103)),
            ..Default::default()
        },
    );

    let mut state = seeded_state();
    state.occupy(Base::Second, PlayerId(101));
    let mut processor = GameProcessor::new(state, &roster, &truth);

    processor.process_event(
        &event(
            "Offensive Substitution",
            "Offensive Substitution: Pinch-runner Chris Taylor replaces Trea Turner.",
            2,
        ),
        1,
        Half::Bottom,
    );

    // The recorded snapshot still shows the player being replaced...
    let row = processor.log().get(0).unwrap();
    assert_eq!(row.second_base, Some(PlayerId(101)));
    // ...while the live state has the pinch-runner after application.
    assert_eq!(processor.state().bases.get(Base::Second), Some(PlayerId(103)));
}
