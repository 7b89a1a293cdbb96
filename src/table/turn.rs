use alloc::vec::Vec;

use crate::player::{Player, PlayerId};

use super::TableState;

impl TableState {
    /// Suggests who should face the bank next.
    ///
    /// Scans forward in seat order from just after `after` (or after the
    /// dealer when `None` or unknown), wrapping around, and returns the first
    /// player who is not the dealer. The suggestion is advisory; any
    /// challenger may be recorded.
    #[must_use]
    pub fn next_challenger(&self, after: Option<PlayerId>) -> Option<PlayerId> {
        self.scan_from(after).find(|&id| id != self.current_dealer)
    }

    /// Like [`next_challenger`](Self::next_challenger), but skips players
    /// who have already played in the current orbit when `skip_played` is set.
    #[must_use]
    pub fn suggest_challenger(&self, after: Option<PlayerId>, skip_played: bool) -> Option<PlayerId> {
        if !skip_played {
            return self.next_challenger(after);
        }
        self.scan_from(after)
            .find(|&id| id != self.current_dealer && !self.has_played(id))
    }

    /// The challenger suggested when a round opens.
    #[must_use]
    pub fn first_challenger(&self) -> Option<PlayerId> {
        self.next_challenger(None)
    }

    /// Returns the non-dealer players in turn order, starting after the dealer.
    #[must_use]
    pub fn challengers(&self) -> Vec<&Player> {
        self.scan_from(None)
            .filter(|&id| id != self.current_dealer)
            .filter_map(|id| self.player(id))
            .collect()
    }

    /// Every seat once, starting just after `after` (or the dealer).
    fn scan_from(&self, after: Option<PlayerId>) -> impl Iterator<Item = PlayerId> + '_ {
        let len = self.players.len();
        let start = after
            .and_then(|id| self.players.iter().position(|player| player.id() == id))
            .unwrap_or_else(|| self.dealer_index());
        let seats = if len < 2 { 0 } else { len };

        (1..=seats).map(move |offset| self.players[(start + offset) % len].id())
    }
}
