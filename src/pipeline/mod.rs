//! Corpus tree traversal shared by audit and conversion.

mod collect;

pub use collect::{collect_audio_files, is_audio_file, mirrored_path};
