//! Mana types, mana costs, and the per-player mana pool.
//!
//! The pool is also the cost ledger: `ManaPool::allocate` works out which mana
//! would pay a cost without touching the pool, and `can_pay`/`pay` are both
//! built on it so they can never disagree.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A kind of mana that can sit in a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ManaType {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl ManaType {
    pub const ALL: [ManaType; 6] = [
        ManaType::White,
        ManaType::Blue,
        ManaType::Black,
        ManaType::Red,
        ManaType::Green,
        ManaType::Colorless,
    ];

    /// Fixed order in which pool mana is spent on the generic part of a cost.
    pub const GENERIC_PAYMENT_ORDER: [ManaType; 6] = [
        ManaType::Colorless,
        ManaType::White,
        ManaType::Blue,
        ManaType::Black,
        ManaType::Red,
        ManaType::Green,
    ];

    pub fn is_colored(self) -> bool {
        self != ManaType::Colorless
    }

    pub fn symbol(self) -> char {
        match self {
            ManaType::White => 'W',
            ManaType::Blue => 'U',
            ManaType::Black => 'B',
            ManaType::Red => 'R',
            ManaType::Green => 'G',
            ManaType::Colorless => 'C',
        }
    }
}

/// Atomic mana payment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ManaSymbol {
    /// White mana {W}
    White,
    /// Blue mana {U}
    Blue,
    /// Black mana {B}
    Black,
    /// Red mana {R}
    Red,
    /// Green mana {G}
    Green,
    /// Colorless mana {C}
    Colorless,
    /// Generic mana {1}, {2}, etc.
    Generic(u8),
}

impl ManaSymbol {
    /// Returns the mana value contribution of this symbol.
    pub fn mana_value(&self) -> u32 {
        match self {
            ManaSymbol::Generic(n) => *n as u32,
            _ => 1,
        }
    }

    /// The exact mana type this symbol demands, or `None` for generic.
    pub fn mana_type(&self) -> Option<ManaType> {
        match self {
            ManaSymbol::White => Some(ManaType::White),
            ManaSymbol::Blue => Some(ManaType::Blue),
            ManaSymbol::Black => Some(ManaType::Black),
            ManaSymbol::Red => Some(ManaType::Red),
            ManaSymbol::Green => Some(ManaType::Green),
            ManaSymbol::Colorless => Some(ManaType::Colorless),
            ManaSymbol::Generic(_) => None,
        }
    }
}

impl From<ManaType> for ManaSymbol {
    fn from(mana: ManaType) -> Self {
        match mana {
            ManaType::White => ManaSymbol::White,
            ManaType::Blue => ManaSymbol::Blue,
            ManaType::Black => ManaSymbol::Black,
            ManaType::Red => ManaSymbol::Red,
            ManaType::Green => ManaSymbol::Green,
            ManaType::Colorless => ManaSymbol::Colorless,
        }
    }
}

/// A mana cost as a list of symbols, all of which must be paid.
///
/// Examples:
/// - `{1}{G}` = `[Generic(1), Green]`
/// - `{W}{W}` = `[White, White]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ManaCost {
    symbols: Vec<ManaSymbol>,
}

impl ManaCost {
    /// Creates an empty mana cost.
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    pub fn from_symbols(symbols: Vec<ManaSymbol>) -> Self {
        Self { symbols }
    }

    /// Parses oracle-style cost text such as `{1}{G}` or `{W}{W}`.
    pub fn parse(text: &str) -> Option<ManaCost> {
        let mut symbols = Vec::new();
        let mut rest = text.trim();
        while !rest.is_empty() {
            let inner_end = rest.find('}')?;
            if !rest.starts_with('{') {
                return None;
            }
            let inner = &rest[1..inner_end];
            let symbol = match inner {
                "W" => ManaSymbol::White,
                "U" => ManaSymbol::Blue,
                "B" => ManaSymbol::Black,
                "R" => ManaSymbol::Red,
                "G" => ManaSymbol::Green,
                "C" => ManaSymbol::Colorless,
                digits => ManaSymbol::Generic(digits.parse().ok()?),
            };
            symbols.push(symbol);
            rest = &rest[inner_end + 1..];
        }
        Some(Self { symbols })
    }

    pub fn symbols(&self) -> &[ManaSymbol] {
        &self.symbols
    }

    pub fn push(&mut self, symbol: ManaSymbol) {
        self.symbols.push(symbol);
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Total mana value of the cost.
    pub fn mana_value(&self) -> u32 {
        self.symbols.iter().map(|s| s.mana_value()).sum()
    }

    /// Total generic mana required.
    pub fn generic_mana_total(&self) -> u32 {
        self.symbols
            .iter()
            .map(|s| match s {
                ManaSymbol::Generic(n) => *n as u32,
                _ => 0,
            })
            .sum()
    }

    /// Number of symbols demanding exactly `mana`.
    pub fn required(&self, mana: ManaType) -> u32 {
        self.symbols
            .iter()
            .filter(|s| s.mana_type() == Some(mana))
            .count() as u32
    }

    /// Renders the cost in oracle notation.
    pub fn to_oracle(&self) -> String {
        let mut out = String::new();
        let generic = self.generic_mana_total();
        if generic > 0 {
            out.push_str(&format!("{{{}}}", generic));
        }
        for symbol in &self.symbols {
            if let Some(mana) = symbol.mana_type() {
                out.push('{');
                out.push(mana.symbol());
                out.push('}');
            }
        }
        if out.is_empty() {
            out.push_str("{0}");
        }
        out
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_oracle())
    }
}

/// A cost could not be paid from a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientMana {
    /// The exact mana type that ran short, or `None` for the generic part.
    pub mana: Option<ManaType>,
    pub needed: u32,
    pub available: u32,
}

impl fmt::Display for InsufficientMana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mana {
            Some(mana) => write!(
                f,
                "insufficient {{{}}} mana: need {}, have {}",
                mana.symbol(),
                self.needed,
                self.available
            ),
            None => write!(
                f,
                "insufficient mana for generic cost: need {}, have {}",
                self.needed, self.available
            ),
        }
    }
}

impl std::error::Error for InsufficientMana {}

/// A player's mana pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ManaPool {
    white: u32,
    blue: u32,
    black: u32,
    red: u32,
    green: u32,
    colorless: u32,
}

impl ManaPool {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, mana: ManaType) -> &mut u32 {
        match mana {
            ManaType::White => &mut self.white,
            ManaType::Blue => &mut self.blue,
            ManaType::Black => &mut self.black,
            ManaType::Red => &mut self.red,
            ManaType::Green => &mut self.green,
            ManaType::Colorless => &mut self.colorless,
        }
    }

    /// Adds mana of the specified type. Saturates at `u32::MAX`.
    pub fn add(&mut self, mana: ManaType, amount: u32) {
        let slot = self.slot_mut(mana);
        *slot = slot.saturating_add(amount);
    }

    /// Adds every amount held by `other` to this pool.
    pub fn add_all(&mut self, other: &ManaPool) {
        for mana in ManaType::ALL {
            self.add(mana, other.balance(mana));
        }
    }

    /// Returns the amount of mana of a specific type.
    pub fn balance(&self, mana: ManaType) -> u32 {
        match mana {
            ManaType::White => self.white,
            ManaType::Blue => self.blue,
            ManaType::Black => self.black,
            ManaType::Red => self.red,
            ManaType::Green => self.green,
            ManaType::Colorless => self.colorless,
        }
    }

    /// Returns the total amount of mana in the pool.
    pub fn total(&self) -> u32 {
        ManaType::ALL
            .iter()
            .fold(0u32, |total, &m| total.saturating_add(self.balance(m)))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Empties the mana pool.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Works out which mana would pay `cost`, without changing the pool.
    ///
    /// Exact-type symbols are reserved first; the generic remainder is then
    /// taken from what is left in `ManaType::GENERIC_PAYMENT_ORDER`.
    pub fn allocate(&self, cost: &ManaCost) -> Result<ManaPool, InsufficientMana> {
        let mut remaining = self.clone();
        let mut spent = ManaPool::new();

        for mana in ManaType::ALL {
            let needed = cost.required(mana);
            let available = remaining.balance(mana);
            if needed > available {
                return Err(InsufficientMana {
                    mana: Some(mana),
                    needed,
                    available,
                });
            }
            *remaining.slot_mut(mana) -= needed;
            spent.add(mana, needed);
        }

        let mut generic = cost.generic_mana_total();
        if generic > remaining.total() {
            return Err(InsufficientMana {
                mana: None,
                needed: generic,
                available: remaining.total(),
            });
        }
        for mana in ManaType::GENERIC_PAYMENT_ORDER {
            let from_this = generic.min(remaining.balance(mana));
            *remaining.slot_mut(mana) -= from_this;
            spent.add(mana, from_this);
            generic -= from_this;
            if generic == 0 {
                break;
            }
        }

        Ok(spent)
    }

    /// Check if this pool can pay a mana cost.
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        self.allocate(cost).is_ok()
    }

    /// Pays `cost` from the pool. On failure the pool is unchanged.
    pub fn pay(&mut self, cost: &ManaCost) -> Result<(), InsufficientMana> {
        self.pay_tracked(cost).map(|_| ())
    }

    /// Pays `cost` and returns exactly which mana was spent.
    pub fn pay_tracked(&mut self, cost: &ManaCost) -> Result<ManaPool, InsufficientMana> {
        let spent = self.allocate(cost)?;
        for mana in ManaType::ALL {
            *self.slot_mut(mana) -= spent.balance(mana);
        }
        Ok(spent)
    }
}
