use crate::ids::CardId;
use crate::mana::{ManaCost, ManaType};
use crate::types::{CardType, Subtype, Supertype};

/// Power and toughness pair for creatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerToughness {
    pub power: i32,
    pub toughness: i32,
}

impl PowerToughness {
    /// Creates a P/T from fixed numeric values.
    pub fn fixed(power: i32, toughness: i32) -> Self {
        Self { power, toughness }
    }
}

/// Static, immutable card definition.
/// This represents the printed characteristics of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub mana_cost: Option<ManaCost>,
    pub supertypes: Vec<Supertype>,
    pub card_types: Vec<CardType>,
    pub subtypes: Vec<Subtype>,
    pub oracle_text: String,
    pub power_toughness: Option<PowerToughness>,
}

impl Card {
    /// Returns the colors in this card's mana cost, in WUBRG order.
    pub fn colors(&self) -> Vec<ManaType> {
        let Some(cost) = &self.mana_cost else {
            return Vec::new();
        };
        ManaType::ALL
            .into_iter()
            .filter(|&m| m.is_colored() && cost.required(m) > 0)
            .collect()
    }

    /// Returns the mana value of this card.
    pub fn mana_value(&self) -> u32 {
        self.mana_cost.as_ref().map_or(0, |c| c.mana_value())
    }

    /// Returns true if this card has the given card type.
    pub fn has_card_type(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    /// Returns true if this card has the given supertype.
    pub fn has_supertype(&self, supertype: Supertype) -> bool {
        self.supertypes.contains(&supertype)
    }

    /// Returns true if this card has the given subtype.
    pub fn has_subtype(&self, subtype: Subtype) -> bool {
        self.subtypes.contains(&subtype)
    }

    pub fn is_creature(&self) -> bool {
        self.has_card_type(CardType::Creature)
    }

    pub fn is_land(&self) -> bool {
        self.has_card_type(CardType::Land)
    }

    pub fn is_instant(&self) -> bool {
        self.has_card_type(CardType::Instant)
    }

    pub fn is_sorcery(&self) -> bool {
        self.has_card_type(CardType::Sorcery)
    }

    /// A card whose types all stay on the battlefield after resolving.
    pub fn is_permanent(&self) -> bool {
        !self.card_types.is_empty() && self.card_types.iter().all(|t| t.is_permanent())
    }
}

/// Builder for constructing Card instances.
#[derive(Debug, Default, Clone)]
pub struct CardBuilder {
    id: CardId,
    name: String,
    mana_cost: Option<ManaCost>,
    supertypes: Vec<Supertype>,
    card_types: Vec<CardType>,
    subtypes: Vec<Subtype>,
    oracle_text: String,
    power_toughness: Option<PowerToughness>,
}

impl CardBuilder {
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn mana_cost(mut self, cost: ManaCost) -> Self {
        self.mana_cost = Some(cost);
        self
    }

    pub fn supertypes(mut self, supertypes: Vec<Supertype>) -> Self {
        self.supertypes = supertypes;
        self
    }

    pub fn card_types(mut self, types: Vec<CardType>) -> Self {
        self.card_types = types;
        self
    }

    pub fn subtypes(mut self, subtypes: Vec<Subtype>) -> Self {
        self.subtypes = subtypes;
        self
    }

    pub fn oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    pub fn power_toughness(mut self, pt: PowerToughness) -> Self {
        self.power_toughness = Some(pt);
        self
    }

    pub fn build(self) -> Card {
        Card {
            id: self.id,
            name: self.name,
            mana_cost: self.mana_cost,
            supertypes: self.supertypes,
            card_types: self.card_types,
            subtypes: self.subtypes,
            oracle_text: self.oracle_text,
            power_toughness: self.power_toughness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mana::ManaSymbol;

    #[test]
    fn test_card_builder() {
        let card = CardBuilder::new(CardId::from_raw(3), "Grizzly Bears")
            .mana_cost(ManaCost::from_symbols(vec![
                ManaSymbol::Generic(1),
                ManaSymbol::Green,
            ]))
            .card_types(vec![CardType::Creature])
            .subtypes(vec![Subtype::Bear])
            .power_toughness(PowerToughness::fixed(2, 2))
            .build();

        assert_eq!(card.name, "Grizzly Bears");
        assert!(card.is_creature());
        assert!(card.is_permanent());
        assert!(!card.is_land());
        assert_eq!(card.mana_value(), 2);
        assert_eq!(card.colors(), vec![ManaType::Green]);
        assert!(card.has_subtype(Subtype::Bear));
    }

    #[test]
    fn test_instant_is_not_permanent() {
        let card = CardBuilder::new(CardId::from_raw(9), "Healing Salve")
            .mana_cost(ManaCost::from_symbols(vec![ManaSymbol::White]))
            .card_types(vec![CardType::Instant])
            .build();
        assert!(card.is_instant());
        assert!(!card.is_permanent());
    }
}
