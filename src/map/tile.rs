use serde::Deserialize;

use crate::error::LevelError;
use crate::texture::Texture;

/// Terrain kind of one map cell. Stored in level files as small integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum Tile {
    Floor,
    Wall,
    CrackWall,
    SlimeWall,
    CrackFloor,
    ElevatorFloor,
    ElevatorSideWall,
    ElevatorBackWall,
}

impl Tile {
    pub fn is_wall(self) -> bool {
        match self {
            Tile::Wall
            | Tile::CrackWall
            | Tile::SlimeWall
            | Tile::ElevatorSideWall
            | Tile::ElevatorBackWall => true,
            Tile::Floor | Tile::CrackFloor | Tile::ElevatorFloor => false,
        }
    }

    /// `[vertical face, horizontal face]` for walls, `[floor, ceiling]`
    /// otherwise.
    pub fn textures(self) -> [Texture; 2] {
        match self {
            Tile::Floor => [Texture::Floor, Texture::Ceiling],
            Tile::CrackFloor => [Texture::CrackFloor, Texture::Ceiling],
            Tile::Wall => [Texture::Wall, Texture::Wall2],
            Tile::CrackWall => [Texture::CrackWall, Texture::CrackWall2],
            Tile::SlimeWall => [Texture::SlimeWall, Texture::SlimeWall2],
            Tile::ElevatorFloor => [Texture::ElevatorFloor, Texture::ElevatorCeiling],
            Tile::ElevatorSideWall => [Texture::ElevatorSideWall, Texture::ElevatorSideWall],
            Tile::ElevatorBackWall => [Texture::ElevatorBackWall, Texture::ElevatorBackWall],
        }
    }
}

impl TryFrom<u8> for Tile {
    type Error = LevelError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Tile::Floor,
            1 => Tile::Wall,
            2 => Tile::CrackWall,
            3 => Tile::SlimeWall,
            4 => Tile::CrackFloor,
            5 => Tile::ElevatorFloor,
            6 => Tile::ElevatorSideWall,
            7 => Tile::ElevatorBackWall,
            other => return Err(LevelError::UnknownTile(other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let tiles: Vec<Tile> = serde_json::from_str("[0, 1, 4, 7]").unwrap();
        assert_eq!(tiles, vec![Tile::Floor, Tile::Wall, Tile::CrackFloor, Tile::ElevatorBackWall]);
        assert!(serde_json::from_str::<Tile>("9").is_err());
    }

    #[test]
    fn test_walls_and_floors_are_disjoint() {
        for code in 0..8u8 {
            let tile = Tile::try_from(code).unwrap();
            let floor_textures = matches!(tile.textures()[1], Texture::Ceiling | Texture::ElevatorCeiling);
            assert_ne!(tile.is_wall(), floor_textures, "{tile:?}");
        }
    }
}
