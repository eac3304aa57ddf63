// Anti-hallucination grounding.
// Step 1: extract verifiable facts from each source bullet.
// Step 2: audit AI rewrites (bullets and letters) against those facts.
// Step 3: rewrite-and-verify with mandatory fallback to the original bullet.

pub mod facts;
pub mod handlers;
pub mod prompts;
pub mod rewrite;
pub mod verifier;

pub use facts::{extract_facts, FactSet};
pub use rewrite::{
    rewrite_achievement, rewrite_achievements, BulletRewriter, RewriteOutcome, RewriteStatus,
    RewriteTarget,
};
pub use verifier::{verify, verify_letter, VerificationConfig, VerificationResult};
