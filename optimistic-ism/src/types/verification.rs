use derive_new::new;

use primitive_types::H256;

/// A proposal-ledger entry: which submodule stood behind a message at
/// proposal time, and when its fraud window opened.
///
/// Entries are written once by `pre_verify` and never mutated. The default
/// value (`ism: None`, `time: 0`) doubles as the reading for a message that
/// has never been proposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, new)]
pub struct Verification {
    /// Address of the submodule that vouched for the proposal, if one was
    /// active at the time.
    pub ism: Option<H256>,
    /// Unix time at which the proposal was recorded. 0 means never
    /// proposed.
    pub time: u64,
}
