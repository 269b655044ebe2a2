use profitlift_core::models::ItemSet;
use rustc_hash::FxHashMap;

/// Maps item ids to dense `u32` ids and back.
#[derive(Debug, Default)]
pub struct ItemInterner {
    ids: FxHashMap<String, u32>,
    names: Vec<String>,
}

impl ItemInterner {
    /// Id for `item`, assigning the next one on first sight.
    pub fn intern(&mut self, item: &str) -> u32 {
        if let Some(&id) = self.ids.get(item) {
            return id;
        }
        let id = self.names.len() as u32;
        self.ids.insert(item.to_string(), id);
        self.names.push(item.to_string());
        id
    }

    /// Item for an id returned by [`Self::intern`].
    pub fn name(&self, id: u32) -> &str {
        &self.names[id as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Intern every transaction into a sorted, deduplicated id list.
    pub fn encode_all(&mut self, transactions: &[ItemSet]) -> Vec<Vec<u32>> {
        transactions
            .iter()
            .map(|t| {
                let mut ids: Vec<u32> = t.iter().map(|item| self.intern(item)).collect();
                ids.sort_unstable();
                ids.dedup();
                ids
            })
            .collect()
    }

    /// Item set for a list of interned ids.
    pub fn decode(&self, ids: &[u32]) -> ItemSet {
        ids.iter().map(|&id| self.name(id)).collect()
    }
}
