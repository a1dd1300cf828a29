// Lesson recommendations

use serde::{Deserialize, Serialize};

use crate::coach::types::UserBehavior;

const BEGINNER: &str = "beginner";
const INTERMEDIATE: &str = "intermediate";

const BEGINNER_LESSONS: [&str; 2] = [
    "Budgeting 101: Understanding Income vs. Expenses",
    "Saving Basics: The Power of Starting Early",
];

const ADVANCED_LESSONS: [&str; 2] = [
    "Investing 101: Risk, Return, and Diversification",
    "Advanced Budgeting: Automating Your Savings",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteracyRecommendation {
    pub level: String,
    pub lessons: Vec<String>,
}

/// Percentage of lessons completed, 0 when there is no lesson data
pub fn completion_score(user: &UserBehavior) -> f64 {
    match &user.lesson_completions {
        Some(lc) => {
            let (done, total) = lc.progress();
            done as f64 / total.max(1) as f64 * 100.0
        }
        None => 0.0,
    }
}

/// A stated experience level from the profile wins over the inferred one.
pub fn recommend_lessons(user: &UserBehavior) -> LiteracyRecommendation {
    let level = match &user.user_profile {
        Some(profile) => profile.experience.clone(),
        None if completion_score(user) < 50.0 => BEGINNER.to_string(),
        None => INTERMEDIATE.to_string(),
    };

    let lessons = if level == BEGINNER {
        BEGINNER_LESSONS
    } else {
        ADVANCED_LESSONS
    };

    LiteracyRecommendation {
        level,
        lessons: lessons.iter().map(|l| l.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::types::{LessonCompletion, LessonRecord, Lessons, UserProfile};

    fn with_lessons(flags: &[bool]) -> UserBehavior {
        let mut user = UserBehavior::empty("u1");
        user.lesson_completions = Some(LessonCompletion {
            id: "lc1".to_string(),
            user_id: "u1".to_string(),
            lessons: Lessons::new(
                flags
                    .iter()
                    .enumerate()
                    .map(|(i, done)| {
                        (
                            format!("Lesson {}", i),
                            LessonRecord {
                                completed: *done,
                                ..Default::default()
                            },
                        )
                    })
                    .collect(),
            ),
        });
        user
    }

    fn profile(experience: &str) -> UserProfile {
        UserProfile {
            id: "p1".to_string(),
            email: "a@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Diaz".to_string(),
            password: String::new(),
            phone_number: String::new(),
            age: "29".to_string(),
            occupation: "Nurse".to_string(),
            visa_status: String::new(),
            preferred_language: "en".to_string(),
            education_level: String::new(),
            monthly_income: "3000".to_string(),
            financial_goals: vec![],
            experience: experience.to_string(),
        }
    }

    #[test]
    fn test_no_data_is_beginner() {
        let rec = recommend_lessons(&UserBehavior::empty("u1"));
        assert_eq!(rec.level, "beginner");
        assert_eq!(rec.lessons[0], BEGINNER_LESSONS[0]);
    }

    #[test]
    fn test_half_complete_is_intermediate() {
        let user = with_lessons(&[true, false]);
        assert_eq!(completion_score(&user), 50.0);
        let rec = recommend_lessons(&user);
        assert_eq!(rec.level, "intermediate");
        assert_eq!(rec.lessons[1], ADVANCED_LESSONS[1]);
    }

    #[test]
    fn test_empty_lessons_score_zero() {
        assert_eq!(completion_score(&with_lessons(&[])), 0.0);
    }

    #[test]
    fn test_profile_experience_wins() {
        let mut user = with_lessons(&[true, true]);
        user.user_profile = Some(profile("beginner"));
        assert_eq!(recommend_lessons(&user).lessons[0], BEGINNER_LESSONS[0]);

        user.user_profile = Some(profile("expert"));
        let rec = recommend_lessons(&user);
        assert_eq!(rec.level, "expert");
        assert_eq!(rec.lessons[0], ADVANCED_LESSONS[0]);
    }
}
