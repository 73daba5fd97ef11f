use hashbrown::HashMap;

/// Position of an entity inside its owning `Vec`, keyed by stable id.
pub type PosIndex<K> = HashMap<K, usize>;
