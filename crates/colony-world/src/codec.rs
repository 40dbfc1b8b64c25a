//! Self-describing encoding of heterogeneous grid objects.
//!
//! Each concrete object type has a variant in [`ObjectRecord`]; a receiver
//! decodes records back into `Box<dyn Object>` without knowing in advance
//! which types it will get.

use crate::ant::Ant;
use crate::colony::Colony;
use crate::object::Object;
use crate::rock::Rock;
use colony_core::Result;
use serde::{Deserialize, Serialize};

/// Registered object types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectRecord {
    Ant(Ant),
    Colony(Colony),
    Rock(Rock),
}

impl ObjectRecord {
    pub fn into_object(self) -> Box<dyn Object> {
        match self {
            ObjectRecord::Ant(ant) => Box::new(ant),
            ObjectRecord::Colony(colony) => Box::new(colony),
            ObjectRecord::Rock(rock) => Box::new(rock),
        }
    }
}

pub fn to_json(records: &[ObjectRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

pub fn from_json(json: &str) -> Result<Vec<ObjectRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_bytes(records: &[ObjectRecord]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(records)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<Vec<ObjectRecord>> {
    Ok(bincode::deserialize(bytes)?)
}

/// Decode straight into trait objects
pub fn decode_objects(bytes: &[u8]) -> Result<Vec<Box<dyn Object>>> {
    Ok(from_bytes(bytes)?
        .into_iter()
        .map(ObjectRecord::into_object)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;
    use colony_core::{Direction, Owner, Point, UnitStats};

    fn mixed() -> Vec<Box<dyn Object>> {
        vec![
            Box::new(Rock::new(Point::new(1, 1), 7)),
            Box::new(Ant::new(
                Owner::from("red"),
                Point::new(0, 3),
                Direction::new(0, 1),
                UnitStats::default(),
            )),
            Box::new(Colony::new(
                Owner::from("red"),
                Point::new(-4, 2),
                UnitStats::default(),
                Some(5),
            )),
        ]
    }

    #[test]
    fn test_bytes_preserve_concrete_types() {
        let records: Vec<ObjectRecord> = mixed().iter().filter_map(|o| o.record()).collect();
        let bytes = to_bytes(&records).unwrap();
        let decoded = decode_objects(&bytes).unwrap();

        let kinds: Vec<ObjectKind> = decoded
            .iter()
            .map(|o| o.view(&Owner::none()).kind)
            .collect();
        assert_eq!(kinds, vec![ObjectKind::Rock, ObjectKind::Ant, ObjectKind::Colony]);
        assert!(decoded[1].as_animate().is_some());
        assert_eq!(decoded[2].point(), Point::new(-4, 2));
    }

    #[test]
    fn test_json_is_tagged_by_type() {
        let records = vec![ObjectRecord::Rock(Rock::new(Point::new(0, 0), 3))];
        let json = to_json(&records).unwrap();
        assert!(json.contains("\"Rock\""));

        let back = from_json(&json).unwrap();
        assert!(matches!(&back[0], ObjectRecord::Rock(r) if r.lifetime() == 3));
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        assert!(matches!(
            from_json("{not json"),
            Err(colony_core::Error::Serialization(_))
        ));
    }
}
