use serde::Deserialize;

use crate::error::LevelError;

/// Spawn marker placed on a map cell. Consumed when the world is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "char")]
pub enum Thing {
    #[default]
    Nothing,
    Player,
    Monster,
    Door,
    Pushwall,
    Switch,
    Medkit,
    Shotgun,
}

impl Thing {
    pub fn marker(self) -> char {
        match self {
            Thing::Nothing => ' ',
            Thing::Player => '@',
            Thing::Monster => '*',
            Thing::Door => '|',
            Thing::Pushwall => '<',
            Thing::Switch => 'l',
            Thing::Medkit => '+',
            Thing::Shotgun => '/',
        }
    }
}

impl TryFrom<char> for Thing {
    type Error = LevelError;

    fn try_from(marker: char) -> Result<Self, Self::Error> {
        Ok(match marker {
            ' ' => Thing::Nothing,
            '@' => Thing::Player,
            '*' => Thing::Monster,
            '|' => Thing::Door,
            '<' => Thing::Pushwall,
            'l' => Thing::Switch,
            '+' => Thing::Medkit,
            '/' => Thing::Shotgun,
            other => return Err(LevelError::UnknownThing(other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_round_trip() {
        for marker in [' ', '@', '*', '|', '<', 'l', '+', '/'] {
            assert_eq!(Thing::try_from(marker).unwrap().marker(), marker);
        }
        assert_eq!(Thing::try_from('?'), Err(LevelError::UnknownThing('?')));
    }
}
