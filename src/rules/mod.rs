//! Move legality and check/checkmate evaluation over board snapshots.

pub mod attacks;
pub mod checkmate;
pub mod diff;
pub mod finalize;
pub mod history;
pub mod movegen;
pub mod resolve;

pub use attacks::{in_check, is_attacked};
pub use checkmate::{is_checkmate, is_checkmate_after};
pub use diff::{diff, SquareDiff};
pub use finalize::{finalize, finalize_castle, finalize_en_passant};
pub use history::{MoveHistory, MoveLog, MoveRecord};
pub use resolve::{resolve, MoveVerdict};
