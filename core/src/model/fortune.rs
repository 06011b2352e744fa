use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fortune {
    GreatBlessing,
    MiddleBlessing,
    SmallBlessing,
    Curse,
    GreatCurse,
}

impl Fortune {
    pub const ALL: [Fortune; 5] = [
        Fortune::GreatBlessing,
        Fortune::MiddleBlessing,
        Fortune::SmallBlessing,
        Fortune::Curse,
        Fortune::GreatCurse,
    ];

    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Fortune {
        *Fortune::ALL.choose(rng).unwrap_or(&Fortune::SmallBlessing)
    }

    pub fn draw_random() -> Fortune {
        Fortune::draw(&mut rand::rng())
    }
}

impl fmt::Display for Fortune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Fortune::GreatBlessing => "🎉 大吉 great blessing",
            Fortune::MiddleBlessing => "😊 中吉 middle blessing",
            Fortune::SmallBlessing => "😐 小吉 small blessing",
            Fortune::Curse => "😥 凶 bad luck",
            Fortune::GreatCurse => "💀 大凶 terrible luck",
        };
        f.write_str(text)
    }
}
