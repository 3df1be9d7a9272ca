//! Collision-avoiding identifier generation for map keys.

use std::collections::HashMap;

use rand::{distributions::Alphanumeric, Rng};

const ID_LENGTH: usize = 10;

/// Samples random alphanumeric identifiers until one is absent from
/// `existing`. Retry avoids collisions at this domain's scale; it does not
/// guarantee uniqueness by construction.
pub fn fresh_id<V>(existing: &HashMap<String, V>) -> String {
    loop {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ID_LENGTH)
            .map(char::from)
            .collect();
        if !existing.contains_key(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::fresh_id;

    #[test]
    fn fresh_id_is_ten_alphanumeric_chars() {
        let empty: HashMap<String, ()> = HashMap::new();
        let id = fresh_id(&empty);
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn fresh_id_avoids_existing_keys() {
        let mut existing: HashMap<String, ()> = HashMap::new();
        for _ in 0..64 {
            let id = fresh_id(&existing);
            assert!(!existing.contains_key(&id));
            existing.insert(id, ());
        }
        assert_eq!(existing.len(), 64);
    }
}
