//! Journey tests against an in-process imitation of the Foody application.

mod common;

use common::{FakeFoody, Faults, BASE};
use foody_e2e::{foody_journey, run_journey, EditExpectation, JourneyContext, SuiteConfig};

fn config() -> SuiteConfig {
    SuiteConfig::new().with_base_url(BASE).with_timeout_ms(200)
}

fn seeded(faults: Faults) -> FakeFoody {
    let app = FakeFoody::with_faults(faults);
    app.seed("Pancakes", "Fluffy");
    app.seed("Goulash", "Hungarian stew");
    app
}

// =============================================================================
// Full journey
// =============================================================================

#[test]
fn test_full_journey_passes_against_current_behaviour() {
    let app = seeded(Faults::deployed());
    let config = config();
    let results = run_journey(&app, &config);

    for failure in results.failures() {
        eprintln!("{}: {:?}", failure.name, failure.error);
    }
    assert!(results.all_passed());
    assert_eq!(results.total(), 8);
    assert!(results.setup.as_ref().is_some_and(|s| s.passed));
}

#[test]
fn test_journey_leaves_expected_application_state() {
    let app = seeded(Faults::deployed());
    let config = config();
    let mut ctx = JourneyContext::new(&app, &config);
    let results = foody_journey().run(&mut ctx);
    assert!(results.all_passed());

    let username = ctx.fixture.username().unwrap();
    assert!(username.starts_with("alp"));
    assert_eq!(username.len(), 6);
    assert_eq!(app.logged_in(), Some(username.clone()));
    assert_eq!(app.users(), vec![username]);

    // the created item survives, the edit-created duplicate was deleted
    let created = ctx.fixture.last_created_title().unwrap();
    let names: Vec<_> = app.foods().into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["Pancakes".to_string(), "Goulash".to_string(), created]);

    // the last observed count is the post-delete listing
    assert_eq!(ctx.fixture.displayed_card_count().unwrap(), 3);
}

#[test]
fn test_generated_titles_follow_their_patterns() {
    let app = seeded(Faults::deployed());
    let config = config();
    let mut ctx = JourneyContext::new(&app, &config);
    foody_journey().run(&mut ctx);

    let title = regex::Regex::new("^Food [A-Z0-9]{5}$").unwrap();
    let description = regex::Regex::new("^Description [A-Z0-9]{10}$").unwrap();
    let edited = regex::Regex::new("^Edited Title [A-Z0-9]{3}$").unwrap();
    assert!(title.is_match(&ctx.fixture.last_created_title().unwrap()));
    assert!(description.is_match(&ctx.fixture.last_created_description().unwrap()));
    assert!(edited.is_match(&ctx.fixture.last_edited_title().unwrap()));
}

// =============================================================================
// Edit expectation
// =============================================================================

#[test]
fn test_in_place_expectation_passes_when_edit_renames() {
    let app = seeded(Faults::default());
    let config = config().with_edit_expectation(EditExpectation::InPlace);
    let mut ctx = JourneyContext::new(&app, &config);
    let results = foody_journey().run(&mut ctx);

    for failure in results.failures() {
        eprintln!("{}: {:?}", failure.name, failure.error);
    }
    assert!(results.all_passed());

    // the renamed item was found by its new title, then deleted
    let edited = ctx.fixture.last_edited_title().unwrap();
    let search = results
        .results
        .iter()
        .find(|r| r.name == "search_for_last_created_item")
        .unwrap();
    assert!(search.passed);
    let names: Vec<_> = app.foods().into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["Pancakes".to_string(), "Goulash".to_string()]);
    assert!(!names.contains(&edited));
}

#[test]
fn test_creates_new_expectation_flags_a_real_edit() {
    let app = seeded(Faults::default());
    let config = config();
    let results = run_journey(&app, &config);

    let failed: Vec<_> = results.failures().iter().map(|r| r.name.clone()).collect();
    assert_eq!(
        failed,
        vec!["edit_last_added_item", "search_for_last_created_item"]
    );
    let error = results.failures()[0].error.clone().unwrap();
    assert!(error.contains("remains after edit"), "{error}");
}

#[test]
fn test_in_place_expectation_flags_the_duplicate() {
    let app = seeded(Faults::deployed());
    let config = config().with_edit_expectation(EditExpectation::InPlace);
    let results = run_journey(&app, &config);

    let failed: Vec<_> = results.failures().iter().map(|r| r.name.clone()).collect();
    assert_eq!(failed, vec!["edit_last_added_item".to_string()]);
    let error = results.failures()[0].error.clone().unwrap();
    assert!(error.contains("still present after edit"), "{error}");
}

// =============================================================================
// Failure isolation
// =============================================================================

#[test]
fn test_failing_step_does_not_stop_later_steps() {
    let app = seeded(Faults {
        reworded_validation: true,
        ..Faults::deployed()
    });
    let config = config();
    let results = run_journey(&app, &config);

    assert_eq!(results.failed_count(), 1);
    assert_eq!(results.passed_count(), 7);
    let failure = results.failures()[0];
    assert_eq!(failure.name, "add_item_invalid_data");
    assert!(failure
        .error
        .as_deref()
        .unwrap()
        .contains("Unable to add this food revue!"));
}

#[test]
fn test_broken_delete_fails_delete_and_deleted_search() {
    let app = seeded(Faults {
        delete_is_noop: true,
        ..Faults::deployed()
    });
    let config = config();
    let results = run_journey(&app, &config);

    let failed: Vec<_> = results.failures().iter().map(|r| r.name.clone()).collect();
    assert_eq!(failed, vec!["delete_last_item", "search_for_deleted_item"]);
    let delete = results.failures()[0];
    assert!(delete
        .error
        .as_deref()
        .unwrap()
        .contains("card count after delete"));
}

#[test]
fn test_setup_failure_fails_every_step() {
    let app = seeded(Faults {
        no_sign_up: true,
        ..Faults::default()
    });
    let config = config();
    let results = run_journey(&app, &config);

    assert_eq!(results.failed_count(), 8);
    assert!(!results.setup.as_ref().unwrap().passed);
    assert!(results
        .results
        .iter()
        .all(|r| r.error.as_deref().unwrap().starts_with("setup failed")));
    // nothing was created
    assert_eq!(app.foods().len(), 2);
}
