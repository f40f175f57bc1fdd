use crate::awards::domain::{AwardCategory, AwardDescriptor};
use crate::awards::mode::{AwardMode, AwardModeResolver};

fn awards(titles: &[&str]) -> Vec<AwardDescriptor> {
    titles
        .iter()
        .zip(1..)
        .map(|(title, order)| AwardDescriptor::new(*title, order))
        .collect()
}

#[test]
fn middle_and_high_titles_split_the_award() {
    let list = awards(&[
        "All-Around Champion (Middle School)",
        "All-Around Champion (High School)",
    ]);
    assert_eq!(
        AwardModeResolver::resolve(&list, AwardCategory::AllAround),
        AwardMode::Split
    );
}

#[test]
fn single_title_is_combined() {
    let list = awards(&["All-Around Champion"]);
    assert_eq!(
        AwardModeResolver::resolve(&list, AwardCategory::AllAround),
        AwardMode::Combined
    );
}

#[test]
fn empty_award_list_is_combined_and_not_offered() {
    let resolved = AwardModeResolver::inspect(&[], AwardCategory::Excellence);
    assert_eq!(resolved.mode, AwardMode::Combined);
    assert!(!resolved.offered);
    assert!(resolved.titles.is_empty());
}

#[test]
fn only_one_grade_title_stays_combined() {
    let list = awards(&["Excellence Award - High School"]);
    let resolved = AwardModeResolver::inspect(&list, AwardCategory::Excellence);
    assert_eq!(resolved.mode, AwardMode::Combined);
    assert!(resolved.offered);
}

#[test]
fn other_categories_do_not_influence_mode() {
    let list = awards(&[
        "Excellence Award - Middle School",
        "Excellence Award - High School",
        "All-Around Champion",
        "Tournament Champions",
    ]);

    assert_eq!(
        AwardModeResolver::resolve(&list, AwardCategory::Excellence),
        AwardMode::Split
    );
    assert_eq!(
        AwardModeResolver::resolve(&list, AwardCategory::AllAround),
        AwardMode::Combined
    );
}

#[test]
fn titles_follow_award_order() {
    let mut list = awards(&[
        "Excellence Award - High School",
        "Excellence Award - Middle School",
    ]);
    list[0].order = 9;

    let resolved = AwardModeResolver::inspect(&list, AwardCategory::Excellence);
    assert_eq!(
        resolved.titles,
        vec![
            "Excellence Award - Middle School".to_string(),
            "Excellence Award - High School".to_string(),
        ]
    );
}
