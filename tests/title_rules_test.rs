use proptest::prelude::*;

use roster::algorithm::features::{CATEGORY_RULES, SENIORITY_RULES};
use roster::algorithm::readiness::remaining_service_years;
use roster::{JobCategory, classify_title, seniority_score};

const LEVELS: [f64; 9] = [4.0, 3.0, 2.0, 1.0, 0.9, 0.7, 0.5, 0.3, 0.2];

fn title_strategy() -> impl Strategy<Value = String> {
    let keywords: Vec<&'static str> = CATEGORY_RULES
        .iter()
        .flat_map(|rule| rule.keywords.iter().copied())
        .chain(SENIORITY_RULES.iter().flat_map(|rule| rule.keywords.iter().copied()))
        .collect();
    (
        "[A-Za-z ]{0,12}",
        proptest::sample::select(keywords),
        "[A-Za-z ]{0,12}",
        any::<bool>(),
    )
        .prop_map(|(prefix, keyword, suffix, with_keyword)| {
            if with_keyword {
                format!("{prefix}{keyword}{suffix}")
            } else {
                format!("{prefix}{suffix}")
            }
        })
}

proptest! {
    #[test]
    fn classification_ignores_case(title in title_strategy()) {
        prop_assert_eq!(classify_title(&title), classify_title(&title.to_lowercase()));
        prop_assert_eq!(classify_title(&title), classify_title(&title.to_uppercase()));
        prop_assert_eq!(
            seniority_score(&title).to_bits(),
            seniority_score(&title.to_lowercase()).to_bits()
        );
    }

    #[test]
    fn outcomes_stay_in_their_domains(title in title_strategy()) {
        let (category, retirement_age) = classify_title(&title);
        prop_assert!([58, 60, 65].contains(&retirement_age));
        if category == JobCategory::Other {
            prop_assert_eq!(retirement_age, 58);
        }
        let level = seniority_score(&title);
        prop_assert!(LEVELS.iter().any(|l| (l - level).abs() < f64::EPSILON));
    }

    #[test]
    fn remaining_years_is_retirement_age_minus_age(
        title in title_strategy(),
        age in 18u32..=70,
    ) {
        let (_, retirement_age) = classify_title(&title);
        let remaining = remaining_service_years(retirement_age, Some(age));
        prop_assert_eq!(remaining, Some(retirement_age as i32 - age as i32));
        prop_assert_eq!(remaining, remaining_service_years(retirement_age, Some(age)));
    }
}

#[test]
fn test_unknown_titles_fall_through() {
    assert_eq!(classify_title("SEKRETARIS DAERAH"), (JobCategory::Other, 58));
    assert!((seniority_score("SEKRETARIS DAERAH") - 0.2).abs() < f64::EPSILON);
}
