//! Record merging
//!
//! Combines the built-in records with an externally loaded list. Records are
//! deduplicated by identity key: the first time a key is seen fixes its
//! position, the last record seen with that key provides the content.

use std::collections::HashMap;

use crate::models::Official;

/// Merge `incoming` into `seed`
///
/// Order of the result follows the first occurrence of each identity key
/// across `seed` then `incoming`; a later record with the same key replaces
/// the earlier one in place.
pub fn merge(seed: &[Official], incoming: &[Official]) -> Vec<Official> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(seed.len() + incoming.len());
    let mut merged: Vec<Official> = Vec::with_capacity(seed.len() + incoming.len());

    for record in seed.iter().chain(incoming) {
        let key = record.identity_key();
        match positions.get(&key) {
            Some(&index) => merged[index] = record.clone(),
            None => {
                positions.insert(key, merged.len());
                merged.push(record.clone());
            }
        }
    }

    merged
}
