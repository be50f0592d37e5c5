//! Student id generation.

use uuid::Uuid;

/// Generate a fresh, globally unique student id (hyphenated UUIDv4).
pub fn new_student_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_student_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_format() {
        let id = new_student_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
