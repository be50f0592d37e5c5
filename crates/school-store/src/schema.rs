//! Record schema - the shape of the persisted student document.
//!
//! Key names match the existing `DATABASE.json` files so stores written by
//! earlier tooling load unchanged.

use crate::grades;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The whole persisted state: student id -> record.
pub type Document = BTreeMap<String, StudentRecord>;

/// Kind of score being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    /// Short in-class test
    Quiz,
    /// Take-home assignment
    Homework,
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreKind::Quiz => f.write_str("quiz"),
            ScoreKind::Homework => f.write_str("homework"),
        }
    }
}

impl FromStr for ScoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quiz" => Ok(ScoreKind::Quiz),
            "homework" => Ok(ScoreKind::Homework),
            other => Err(format!("unknown score kind: {} (expected quiz or homework)", other)),
        }
    }
}

/// Scores and derived averages for one subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrades {
    /// Quiz scores in insertion order
    #[serde(rename = "Interro", default)]
    pub quiz_scores: Vec<f64>,

    /// Homework scores in insertion order
    #[serde(rename = "Devoir", default)]
    pub homework_scores: Vec<f64>,

    /// Mean of `quiz_scores`, present iff it is non-empty
    #[serde(rename = "MI", default)]
    pub quiz_average: Option<f64>,

    /// Mean of `homework_scores`, present iff it is non-empty
    #[serde(rename = "MD", default)]
    pub homework_average: Option<f64>,

    /// Blended average from the last explicit computation.
    ///
    /// Not refreshed when scores are appended; callers recompute it.
    #[serde(rename = "MM", default)]
    pub overall_average: Option<f64>,
}

impl SubjectGrades {
    /// Average of the given kind, if any score of that kind exists.
    pub fn average(&self, kind: ScoreKind) -> Option<f64> {
        match kind {
            ScoreKind::Quiz => self.quiz_average,
            ScoreKind::Homework => self.homework_average,
        }
    }

    /// Append a score and recompute the average of that kind only.
    pub fn push(&mut self, kind: ScoreKind, score: f64) {
        match kind {
            ScoreKind::Quiz => {
                self.quiz_scores.push(score);
                self.quiz_average = grades::mean(&self.quiz_scores);
            }
            ScoreKind::Homework => {
                self.homework_scores.push(score);
                self.homework_average = grades::mean(&self.homework_scores);
            }
        }
    }
}

/// One student's identity, credential and grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "Nom")]
    pub last_name: String,

    #[serde(rename = "Prenom")]
    pub first_name: String,

    /// Free text, as entered
    #[serde(rename = "Age")]
    pub age: String,

    #[serde(rename = "Sexe")]
    pub sex: String,

    #[serde(rename = "Classe")]
    pub class_name: String,

    /// Login secret, stored and compared in plain text.
    #[serde(rename = "Mot de passe")]
    pub secret: String,

    /// Subject (uppercased) -> grades
    #[serde(rename = "Notes", default)]
    pub grades: BTreeMap<String, SubjectGrades>,

    /// Keys this schema does not know about, kept across load/save
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StudentRecord {
    /// Exact, case-sensitive secret comparison.
    pub fn secret_matches(&self, submitted: &str) -> bool {
        self.secret == submitted
    }

    /// Subjects in name order, optionally restricted to one subject.
    pub fn subjects<'a>(
        &'a self,
        filter: Option<&str>,
    ) -> impl Iterator<Item = (&'a str, &'a SubjectGrades)> + 'a {
        let filter = filter
            .map(normalize_subject)
            .filter(|subject| !subject.is_empty());
        self.grades
            .iter()
            .filter(move |(name, _)| filter.as_deref().is_none_or(|f| f == name.as_str()))
            .map(|(name, grades)| (name.as_str(), grades))
    }
}

/// Identity and credential supplied at enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub last_name: String,
    pub first_name: String,
    pub age: String,
    pub sex: String,
    pub class_name: String,
    pub secret: String,
}

impl NewStudent {
    /// Build a record with no grades.
    pub fn into_record(self) -> StudentRecord {
        StudentRecord {
            last_name: self.last_name,
            first_name: self.first_name,
            age: self.age,
            sex: self.sex,
            class_name: self.class_name,
            secret: self.secret,
            grades: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Canonical subject key: trimmed and uppercased.
pub fn normalize_subject(subject: &str) -> String {
    subject.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> NewStudent {
        NewStudent {
            last_name: "Durand".to_string(),
            first_name: "Élodie".to_string(),
            age: "16".to_string(),
            sex: "F".to_string(),
            class_name: "1ère S".to_string(),
            secret: "s3cret".to_string(),
        }
    }

    #[test]
    fn test_push_recomputes_matching_average_only() {
        let mut grades = SubjectGrades::default();
        grades.push(ScoreKind::Quiz, 14.0);
        grades.push(ScoreKind::Quiz, 11.0);
        assert_eq!(grades.quiz_average, Some(12.5));
        assert_eq!(grades.homework_average, None);

        grades.overall_average = Some(12.5);
        grades.push(ScoreKind::Homework, 8.0);
        assert_eq!(grades.quiz_average, Some(12.5));
        assert_eq!(grades.homework_average, Some(8.0));
        // Left stale until recomputed.
        assert_eq!(grades.overall_average, Some(12.5));
    }

    #[test]
    fn test_record_keys() {
        let mut record = student().into_record();
        record
            .grades
            .entry("MATH".to_string())
            .or_default()
            .push(ScoreKind::Homework, 10.0);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Nom"], "Durand");
        assert_eq!(json["Mot de passe"], "s3cret");
        assert_eq!(json["Notes"]["MATH"]["Devoir"][0], 10.0);
        assert!(json["Notes"]["MATH"]["MI"].is_null());
        assert!(json["Notes"]["MATH"]["MM"].is_null());
    }

    #[test]
    fn test_unknown_keys_survive() {
        let json = r#"{
            "Nom": "Martin", "Prenom": "Paul", "Age": "17", "Sexe": "M",
            "Classe": "TS2", "Mot de passe": "pw", "Notes": {},
            "Remarque": "transféré"
        }"#;
        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra["Remarque"], "transféré");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["Remarque"], "transféré");
    }

    #[test]
    fn test_secret_is_case_sensitive() {
        let record = student().into_record();
        assert!(record.secret_matches("s3cret"));
        assert!(!record.secret_matches("S3CRET"));
        assert!(!record.secret_matches("s3cret "));
    }

    #[test]
    fn test_subjects_filter() {
        let mut record = student().into_record();
        record.grades.insert("MATH".to_string(), SubjectGrades::default());
        record.grades.insert("PHYSIQUE".to_string(), SubjectGrades::default());

        let all: Vec<_> = record.subjects(None).map(|(name, _)| name).collect();
        assert_eq!(all, vec!["MATH", "PHYSIQUE"]);

        let math: Vec<_> = record.subjects(Some(" math ")).map(|(name, _)| name).collect();
        assert_eq!(math, vec!["MATH"]);

        assert_eq!(record.subjects(Some("HISTOIRE")).count(), 0);
        assert_eq!(record.subjects(Some("  ")).count(), 2);
    }

    #[test]
    fn test_score_kind_parse() {
        assert_eq!("Quiz".parse::<ScoreKind>(), Ok(ScoreKind::Quiz));
        assert_eq!(" homework".parse::<ScoreKind>(), Ok(ScoreKind::Homework));
        assert!("exam".parse::<ScoreKind>().is_err());
        assert_eq!(ScoreKind::Homework.to_string(), "homework");
    }
}
