use crate::chess::{Move, Promotion, Square};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A move submitted on behalf of a player.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{} plays {}{}", player, from, to)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    #[cfg_attr(test, strategy("[a-z]{1,8}"))]
    pub player: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl MoveRequest {
    /// A request without a promotion choice.
    pub fn new(player: impl Into<String>, from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            player: player.into(),
            promotion: None,
        }
    }

    /// Attaches a promotion choice.
    pub fn with_promotion(mut self, promotion: impl Into<String>) -> Self {
        self.promotion = Some(promotion.into());
        self
    }

    /// The [`Move`] requested, with the promotion choice normalized.
    pub fn to_move(&self) -> Move {
        let promotion = Promotion::normalize(self.promotion.as_deref());
        Move::new(self.from, self.to).with_promotion(promotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn to_move_preserves_squares(r: MoveRequest) {
        let m = r.to_move();
        assert_eq!(m.whence(), r.from);
        assert_eq!(m.whither(), r.to);
    }

    #[proptest]
    fn missing_promotion_defaults_to_queen(a: Square, b: Square) {
        let r = MoveRequest::new("alice", a, b);
        assert_eq!(r.to_move().promotion(), Promotion::Queen);
    }

    #[proptest]
    fn promotion_choice_is_normalized(a: Square, b: Square, p: Promotion) {
        let r = MoveRequest::new("alice", a, b).with_promotion(p.to_string().to_uppercase());
        assert_eq!(r.to_move().promotion(), p);
    }

    #[test]
    fn request_deserializes_without_promotion() {
        let r: MoveRequest = ron::from_str(r#"(from: "e2", to: "e4", player: "alice")"#).unwrap();
        assert_eq!(r, MoveRequest::new("alice", "e2".parse().unwrap(), "e4".parse().unwrap()));
    }

    #[test]
    fn request_prints_player_and_move() {
        let r = MoveRequest::new("bob", "g8".parse().unwrap(), "f6".parse().unwrap());
        assert_eq!(r.to_string(), "bob plays g8f6");
    }
}
