use sha2::{Digest, Sha256};

use crate::replay::InputFrame;
use crate::scene::MatchSnapshot;

/// SHA-256 hash of an input transcript.
pub fn hash_transcript(frames: &[InputFrame]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for frame in frames {
        hasher.update(frame.delta_ms.to_le_bytes());
        hasher.update((frame.held.len() as u32).to_le_bytes());
        for key in &frame.held {
            hasher.update([key.code()]);
        }
    }
    hasher.finalize().into()
}

/// SHA-256 digest of the gameplay-relevant parts of a snapshot.
pub fn hash_snapshot(snapshot: &MatchSnapshot) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(snapshot.frame.to_le_bytes());
    hasher.update(snapshot.now_ms.to_le_bytes());
    for f in &snapshot.fighters {
        hasher.update((f.id as u32).to_le_bytes());
        hasher.update(f.position.x.to_le_bytes());
        hasher.update(f.position.y.to_le_bytes());
        hasher.update(f.velocity.x.to_le_bytes());
        hasher.update(f.velocity.y.to_le_bytes());
        hasher.update(f.percent.to_le_bytes());
        hasher.update(f.stocks.to_le_bytes());
        hasher.update([f.facing as u8, f.grounded as u8]);
        hasher.update(f.jumps_used.to_le_bytes());
    }
    hasher.update((snapshot.live_hitboxes as u32).to_le_bytes());
    hasher.finalize().into()
}
