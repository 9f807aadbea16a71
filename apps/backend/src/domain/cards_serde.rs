//! Serde impls for card types.
//!
//! Cards cross the wire and the persisted store as
//! `{"id":"hearts-9","suit":"hearts","rank":"9"}`; the `id` field is
//! derived and is ignored (when present) on the way back in.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Rank, Suit};

impl Serialize for Suit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Suit::parse(&s).map_err(de::Error::custom)
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rank::parse(&s).map_err(de::Error::custom)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Card", 3)?;
        st.serialize_field("id", &self.id())?;
        st.serialize_field("suit", &self.suit)?;
        st.serialize_field("rank", &self.rank)?;
        st.end()
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CardVisitor;

        impl<'de> Visitor<'de> for CardVisitor {
            type Value = Card;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a card object with suit and rank")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Card, A::Error> {
                let mut suit: Option<Suit> = None;
                let mut rank: Option<Rank> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "suit" => suit = Some(map.next_value()?),
                        "rank" => rank = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                let suit = suit.ok_or_else(|| de::Error::missing_field("suit"))?;
                let rank = rank.ok_or_else(|| de::Error::missing_field("rank"))?;
                Ok(Card::new(suit, rank))
            }
        }

        deserializer.deserialize_map(CardVisitor)
    }
}
