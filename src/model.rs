use std::fmt;

/// ワールド上の連続座標
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Point3::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// 各成分を floor したブロック座標
    pub fn block_cell(&self) -> BlockCell {
        BlockCell::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockCell {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockCell { x, y, z }
    }

    pub fn above(&self) -> Self {
        BlockCell::new(self.x, self.y + 1, self.z)
    }
}

/// ブロックの通行可否
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// 空気、または未ロードのチャンク
    Empty,
    Passable,
    Solid,
}

impl BlockKind {
    pub fn is_solid(&self) -> bool {
        matches!(self, BlockKind::Solid)
    }
}

/// 他プレイヤーの観測値。yaw はラジアン (Minecraft の向き規約)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSighting {
    pub position: Point3,
    pub yaw: f64,
}

impl PlayerSighting {
    const EYE_HEIGHT: f64 = 1.6;

    pub fn head_position(&self) -> Point3 {
        self.position.offset(0.0, Self::EYE_HEIGHT, 0.0)
    }

    /// 視線方向に distance ブロック進んだ地点 (高さは据え置き)
    pub fn point_in_front(&self, distance: f64) -> Point3 {
        self.position.offset(
            -self.yaw.sin() * distance,
            0.0,
            self.yaw.cos() * distance,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub name: String,
    pub count: i32,
}

impl InventoryEntry {
    pub fn new(name: impl Into<String>, count: i32) -> Self {
        InventoryEntry {
            name: name.into(),
            count,
        }
    }
}

impl fmt::Display for InventoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_block_cell_floors_negative_coordinates() {
        let cell = Point3::new(-0.5, 64.99, -2.0).block_cell();
        assert_eq!(cell, BlockCell::new(-1, 64, -2));
    }

    #[test]
    fn test_point_in_front_follows_yaw() {
        let origin = Point3::new(0.0, 64.0, 0.0);

        // yaw 0 は +z 方向
        let south = PlayerSighting { position: origin, yaw: 0.0 }.point_in_front(3.0);
        assert!((south.x - 0.0).abs() < 1e-9);
        assert!((south.z - 3.0).abs() < 1e-9);

        let west = PlayerSighting { position: origin, yaw: FRAC_PI_2 }.point_in_front(3.0);
        assert!((west.x + 3.0).abs() < 1e-9);
        assert!(west.z.abs() < 1e-9);

        let north = PlayerSighting { position: origin, yaw: PI }.point_in_front(3.0);
        assert!((north.z + 3.0).abs() < 1e-9);
        assert_eq!(north.y, 64.0);
    }

    #[test]
    fn test_head_position() {
        let sighting = PlayerSighting {
            position: Point3::new(1.0, 70.0, 2.0),
            yaw: 0.0,
        };
        let head = sighting.head_position();
        assert_eq!((head.x, head.z), (1.0, 2.0));
        assert!((head.y - 71.6).abs() < 1e-9);
    }

    #[test]
    fn test_inventory_entry_display() {
        assert_eq!(InventoryEntry::new("dirt", 12).to_string(), "12 dirt");
    }
}
