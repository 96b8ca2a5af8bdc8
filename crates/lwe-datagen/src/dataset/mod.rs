/*!
 * Batch generation of paired datasets.
 *
 * Every configured dataset yields a *baseline* instance, generated for a
 * sparse binary secret, and an *idea* instance generated for the obfuscation
 * of that same secret. Both are saved next to each other with their secret
 * metadata and listed in a CSV index.
 */

mod config;
mod record;
mod storage;

pub use config::{DatasetSpec, GenerationConfig, IdeaParams};
pub use record::{
    generate_all, DatasetKind, DatasetPair, DatasetRecord, SecretMetadata, BASELINE_SEED_OFFSET,
    IDEA_SEED_OFFSET,
};
pub use storage::{
    load_instance, read_index, write_index, IndexRow, TrainerParams, INDEX_FILE, SPLITS,
};
