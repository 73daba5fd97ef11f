use cuberesults::{
    core::competition::{Competition, DocumentError, LookupError},
    engine::{config::EngineConfig, lifecycle::RoundState},
    types::{Direction, Format},
    views::{person_results, round_summaries, round_view},
    wcif::{ActivityCode, ActivityCodeError, CompetitionDocument},
};

const FIXTURE: &str = include_str!("fixtures/open2026.json");

fn doc() -> CompetitionDocument {
    serde_json::from_str(FIXTURE).expect("fixture parses")
}

fn code(s: &str) -> ActivityCode {
    s.parse().expect("activity code")
}

#[test]
fn activity_codes_parse_and_print() {
    let c = code("333-r2-g1-a3");
    assert_eq!(c.event_id, "333");
    assert_eq!(c.round_number, Some(2));
    assert_eq!(c.group, Some(1));
    assert_eq!(c.attempt, Some(3));
    assert_eq!(c.to_string(), "333-r2-g1-a3");
    assert_eq!(c.round_code(), ActivityCode::round("333", 2));
    assert_eq!(c.previous_round(), Some(ActivityCode::round("333", 1)));
    assert_eq!(code("333-r1").previous_round(), None);

    assert!(matches!("".parse::<ActivityCode>(), Err(ActivityCodeError::MissingEvent(_))));
    assert!(matches!(
        "333-x1".parse::<ActivityCode>(),
        Err(ActivityCodeError::InvalidSegment { .. })
    ));
    assert!("333-r1-r2".parse::<ActivityCode>().is_err());
    assert!("333-r".parse::<ActivityCode>().is_err());
}

#[test]
fn wcif_attempt_objects_are_accepted() {
    let comp = Competition::from_document(doc()).unwrap();
    let round = comp.round(&code("222-r1")).unwrap();
    assert_eq!(round.format, Format::BestOf2);
    assert_eq!(round.results[0].attempts, vec![500, -1]);
}

#[test]
fn export_reloads_to_the_same_document() {
    let comp = Competition::from_document(doc()).unwrap();
    let json = serde_json::to_string(&comp.export_document()).unwrap();
    let again = Competition::from_json(&json).unwrap();
    assert_eq!(again.document(), comp.document());
}

#[test]
fn structural_violations_are_rejected() {
    let mut dup_person = doc();
    dup_person.persons[1].registrant_id = 1;
    assert!(matches!(
        Competition::from_document(dup_person),
        Err(DocumentError::DuplicatePerson(1))
    ));

    let mut gap = doc();
    gap.events[0].rounds[1].id = ActivityCode::round("333", 3);
    assert!(matches!(
        Competition::from_document(gap),
        Err(DocumentError::NonContiguousRounds { expected: 2, .. })
    ));

    let mut foreign = doc();
    foreign.events[1].rounds[0].id = ActivityCode::round("333", 1);
    assert!(matches!(
        Competition::from_document(foreign),
        Err(DocumentError::ForeignRound { .. })
    ));

    let mut unnumbered = doc();
    unnumbered.events[0].rounds[0].id = code("333");
    assert!(matches!(
        Competition::from_document(unnumbered),
        Err(DocumentError::ForeignRound { .. })
    ));

    let mut dup_result = doc();
    let first = dup_result.events[0].rounds[0].results[0].clone();
    dup_result.events[0].rounds[0].results.push(first);
    assert!(matches!(
        Competition::from_document(dup_result),
        Err(DocumentError::DuplicateResult { person_id: 1, .. })
    ));

    assert!(matches!(Competition::from_json("{"), Err(DocumentError::Json(_))));
}

#[test]
fn lookups_report_missing_entities() {
    let comp = Competition::from_document(doc()).unwrap();
    assert_eq!(comp.total_rounds("333").unwrap(), 2);
    assert_eq!(comp.person(3).unwrap().name, "Chidi Okoro");
    assert_eq!(comp.person(99), Err(LookupError::UnknownPerson(99)));
    assert!(matches!(comp.event("444"), Err(LookupError::UnknownEvent(_))));
    assert!(matches!(comp.round(&code("333-r0")), Err(LookupError::UnknownRound(_))));
    assert!(comp.previous_round(&code("333-r1")).unwrap().is_none());
    assert_eq!(
        comp.previous_round(&code("333-r2")).unwrap().map(|r| r.id.clone()),
        Some(code("333-r1"))
    );
    let registered: Vec<_> = comp.registered_for("222").iter().map(|p| p.registrant_id).collect();
    assert_eq!(registered, vec![1]);
}

#[test]
fn round_view_tags_advancing_results() {
    let comp = Competition::from_document(doc()).unwrap();
    let view = round_view(&comp, &code("333-r1"), &EngineConfig::default()).unwrap();

    assert_eq!(view.name, "First Round");
    assert_eq!(view.label, "R1");
    assert_eq!(view.state, RoundState::Finished);
    assert_eq!(view.badge, Some("Done"));

    let rows: Vec<_> = view
        .results
        .iter()
        .map(|r| (r.person_id, r.ranking, r.advancing))
        .collect();
    assert_eq!(
        rows,
        vec![
            (2, Some(1), true),
            (1, Some(2), true),
            (3, Some(3), true),
            (4, Some(3), true),
            (5, Some(5), false),
        ]
    );
    assert_eq!(view.format_name, "Mean of 3");
    assert_eq!(view.format_short_name, "Mo3");
    assert_eq!(view.results[0].average, Some(900));
    assert_eq!(view.results[0].country_iso2.as_deref(), Some("DK"));
}

#[test]
fn one_bad_round_does_not_affect_siblings() {
    let comp = Competition::from_document(doc()).unwrap();
    let summaries = round_summaries(&comp, &EngineConfig::default());

    let states: Vec<_> = summaries
        .iter()
        .map(|s| (s.id.to_string(), s.name.as_str(), s.state, s.advancement_error.is_some()))
        .collect();
    assert_eq!(
        states,
        vec![
            ("333-r1".to_string(), "First Round", RoundState::Finished, false),
            ("333-r2".to_string(), "Final", RoundState::Active, false),
            ("222-r1".to_string(), "Final", RoundState::Finished, true),
        ]
    );

    let bad = round_view(&comp, &code("222-r1"), &EngineConfig::default()).unwrap();
    assert_eq!(bad.results[0].best, Some(500));
    assert!(!bad.results[0].advancing);
    assert!(bad.advancement_error.unwrap().contains("bogus"));
}

#[test]
fn person_results_cover_rounds_with_attempts() {
    let comp = Competition::from_document(doc()).unwrap();
    let results = person_results(&comp, 1, &EngineConfig::default()).unwrap();

    let rows: Vec<_> = results
        .iter()
        .map(|r| (r.round.to_string(), r.ranking, r.advancing))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("333-r1".to_string(), Some(2), true),
            ("222-r1".to_string(), Some(1), false),
        ]
    );
    assert!(person_results(&comp, 42, &EngineConfig::default()).is_err());
}

#[test]
fn views_serialize_for_presentation() {
    let comp = Competition::from_document(doc()).unwrap();
    let view = round_view(&comp, &code("333-r1"), &EngineConfig::default()).unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], "333-r1");
    assert_eq!(json["format"], "m");
    assert_eq!(json["state"], "finished");
    assert_eq!(json["results"][0]["advancing"], true);
}

#[test]
fn config_loads_partially_from_json() {
    let config = EngineConfig::from_json(
        r#"{ "cutoffBoundary": "inclusive", "directionOverrides": { "333mbf": "higherIsBetter" } }"#,
    )
    .unwrap();
    assert_eq!(config.direction, Direction::LowerIsBetter);
    assert_eq!(config.direction_for("333mbf"), Direction::HigherIsBetter);
    assert_eq!(config.direction_for("333"), Direction::LowerIsBetter);
    assert_eq!(config.max_advancing_percent, None);
}

#[test]
fn formats_round_trip_through_their_ids() {
    for format in Format::ALL {
        assert_eq!(Format::from_id(format.id()), Some(format));
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, format!("\"{}\"", format.id()));
    }
    assert_eq!(Format::from_id('a').map(Format::short_name), Some("Ao5"));
    assert_eq!(Format::from_id('x'), None);
}
