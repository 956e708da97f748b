use tracing::trace;

use crate::error::QuestError;

pub const DEFAULT_BUCKET_COUNT: usize = 20;

/// Polynomial string hash: `h = h * 31 + byte` over the UTF-8 bytes, in
/// wrapping 32-bit arithmetic.
pub fn hash_key(key: &str) -> u32 {
    key.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}

#[derive(Debug)]
struct Entry {
    clue: String,
    suspect: String,
    next: Option<Box<Entry>>,
}

/// Clue → suspect table with a fixed number of buckets and chained
/// collisions. New entries go to the head of their chain, so a repeated key
/// shadows the older entry.
#[derive(Debug)]
pub struct SuspectIndex {
    buckets: Vec<Option<Box<Entry>>>,
    len: usize,
}

impl Default for SuspectIndex {
    fn default() -> Self {
        Self {
            buckets: (0..DEFAULT_BUCKET_COUNT).map(|_| None).collect(),
            len: 0,
        }
    }
}

impl SuspectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(bucket_count: usize) -> Result<Self, QuestError> {
        if bucket_count == 0 {
            return Err(QuestError::ZeroBuckets);
        }
        Ok(Self {
            buckets: (0..bucket_count).map(|_| None).collect(),
            len: 0,
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_of(&self, key: &str) -> usize {
        hash_key(key) as usize % self.buckets.len()
    }

    pub fn insert(&mut self, clue: impl Into<String>, suspect: impl Into<String>) {
        let clue = clue.into();
        let bucket = self.bucket_of(&clue);
        trace!(%clue, bucket, "indexing clue");

        let head = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(Entry {
            clue,
            suspect: suspect.into(),
            next: head,
        }));
        self.len += 1;
    }

    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let mut current = self.buckets[self.bucket_of(clue)].as_deref();
        while let Some(entry) = current {
            if entry.clue == clue {
                return Some(&entry.suspect);
            }
            current = entry.next.as_deref();
        }
        None
    }

    pub fn chain_len(&self, bucket: usize) -> usize {
        let mut count = 0;
        let mut current = self.buckets.get(bucket).and_then(|b| b.as_deref());
        while let Some(entry) = current {
            count += 1;
            current = entry.next.as_deref();
        }
        count
    }

    /// Entries counted with duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for SuspectIndex {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut current = bucket.take();
            while let Some(mut entry) = current {
                current = entry.next.take();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_golden_values() {
        assert_eq!(hash_key(""), 0);
        assert_eq!(hash_key("a"), 97);
        assert_eq!(hash_key("ab"), 97 * 31 + 98);
        assert_eq!(hash_key("Faca desaparecida do bloco"), 1_883_809_375);
        assert_eq!(hash_key("Pegadas molhadas no tapete"), 3_871_851_230);

        let index = SuspectIndex::new();
        assert_eq!(index.bucket_of("Faca desaparecida do bloco"), 15);
        assert_eq!(index.bucket_of("Testamento adulterado"), 19);
        assert_eq!(index.bucket_of("Carta ameacadora escondida"), 5);
    }

    #[test]
    fn test_lookup_hits_and_misses() {
        let mut index = SuspectIndex::new();
        index.insert("Faca desaparecida do bloco", "Cozinheiro");
        index.insert("Testamento adulterado", "Advogado");

        assert_eq!(index.lookup("Faca desaparecida do bloco"), Some("Cozinheiro"));
        assert_eq!(index.lookup("Testamento adulterado"), Some("Advogado"));
        assert_eq!(index.lookup("Testamento"), None);
        assert_eq!(index.lookup("testamento adulterado"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_colliding_keys_share_a_chain() {
        let mut index = SuspectIndex::new();
        // Both land in bucket 8.
        index.insert("Livro aberto sobre venenos", "Mordomo");
        index.insert("Frasco vazio de arsenico", "Mordomo");
        // Both land in bucket 10.
        index.insert("Pegadas molhadas no tapete", "Jardineiro");
        index.insert("Documento queimado parcialmente", "Advogado");

        assert_eq!(index.chain_len(8), 2);
        assert_eq!(index.chain_len(10), 2);
        assert_eq!(index.lookup("Livro aberto sobre venenos"), Some("Mordomo"));
        assert_eq!(index.lookup("Pegadas molhadas no tapete"), Some("Jardineiro"));
        assert_eq!(index.lookup("Documento queimado parcialmente"), Some("Advogado"));
    }

    #[test]
    fn test_single_bucket_chains_everything() {
        let mut index = SuspectIndex::with_buckets(1).unwrap();
        for i in 0..100 {
            index.insert(format!("clue {}", i), format!("suspect {}", i % 7));
        }
        assert_eq!(index.chain_len(0), 100);
        for i in 0..100 {
            assert_eq!(
                index.lookup(&format!("clue {}", i)),
                Some(format!("suspect {}", i % 7).as_str())
            );
        }
        assert_eq!(index.lookup("clue 100"), None);
    }

    #[test]
    fn test_duplicate_key_shadows_older_entry() {
        let mut index = SuspectIndex::new();
        index.insert("Cofre vazio", "Mordomo");
        index.insert("Cofre vazio", "Advogado");
        let bucket = index.bucket_of("Cofre vazio");
        assert_eq!(index.chain_len(bucket), 2);
        assert_eq!(index.lookup("Cofre vazio"), Some("Advogado"));
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert_eq!(SuspectIndex::with_buckets(0).unwrap_err(), QuestError::ZeroBuckets);
        assert_eq!(SuspectIndex::with_buckets(7).unwrap().bucket_count(), 7);
        assert_eq!(SuspectIndex::new().chain_len(99), 0);
    }
}
