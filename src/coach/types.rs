// Request snapshot types
//
// Field names follow the wire format of the mobile client: entity fields are
// camelCase, envelope fields are snake_case.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Signed amount; negative values are expenses
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeItem {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub source: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub id: String,
    pub user_id: String,
    pub goal_name: String,
    pub target: f64,
    pub saved: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub phone_number: String,
    pub age: String,
    pub occupation: String,
    pub visa_status: String,
    pub preferred_language: String,
    pub education_level: String,
    pub monthly_income: String,
    pub financial_goals: Vec<String>,
    pub experience: String,
}

/// Progress record for one lesson. Only `completed` is interpreted; any other
/// keys the client sends are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    #[serde(default, deserialize_with = "truthy")]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Loose flag: null, false, 0, "" and empty arrays or objects are false,
/// anything else is true.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    })
}

/// Lessons keyed by name, in the order the client sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lessons(Vec<(String, LessonRecord)>);

impl Lessons {
    pub fn new(entries: Vec<(String, LessonRecord)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LessonRecord)> {
        self.0.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Names of completed lessons, in input order
    pub fn completed(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, record)| record.completed)
            .map(|(name, _)| name)
            .collect()
    }
}

impl Serialize for Lessons {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, record) in &self.0 {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Lessons {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LessonsVisitor;

        impl<'de> Visitor<'de> for LessonsVisitor {
            type Value = Lessons;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from lesson name to lesson record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Lessons, A::Error> {
                let capacity = access.size_hint().unwrap_or(0);
                let mut entries: Vec<(String, LessonRecord)> = Vec::with_capacity(capacity);
                let mut positions: HashMap<String, usize> = HashMap::with_capacity(capacity);
                while let Some((name, record)) = access.next_entry::<String, LessonRecord>()? {
                    // Later duplicates replace earlier ones, like a JSON object would
                    match positions.get(&name).copied() {
                        Some(index) => entries[index].1 = record,
                        None => {
                            positions.insert(name.clone(), entries.len());
                            entries.push((name, record));
                        }
                    }
                }
                Ok(Lessons(entries))
            }
        }

        deserializer.deserialize_map(LessonsVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCompletion {
    pub id: String,
    pub user_id: String,
    pub lessons: Lessons,
}

impl LessonCompletion {
    /// (completed, total)
    pub fn progress(&self) -> (usize, usize) {
        (self.lessons.completed().len(), self.lessons.len())
    }
}

/// One user's financial snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBehavior {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub recent_transactions: Vec<Transaction>,
    pub recent_income: Vec<IncomeItem>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    #[serde(default)]
    pub lesson_completions: Option<LessonCompletion>,
    #[serde(default)]
    pub savings_goals: Option<Vec<SavingGoal>>,
}

impl UserBehavior {
    /// Snapshot with no records at all
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            recent_transactions: Vec::new(),
            recent_income: Vec::new(),
            user_profile: None,
            lesson_completions: None,
            savings_goals: None,
        }
    }

    pub fn goals(&self) -> &[SavingGoal] {
        self.savings_goals.as_deref().unwrap_or(&[])
    }
}

/// Body of `POST /financial-coach`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachRequest {
    pub user: UserBehavior,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
}
