use std::{
    cell::RefCell,
    collections::HashMap,
    ops::RangeInclusive,
};

use crate::model::{BlockCell, BlockKind, Point3};

/// 探索する方向。十字方向を先に、斜め方向を後に調べる
pub const CANDIDATE_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const SEARCH_DISTANCES: RangeInclusive<i32> = 2..=5;

/// ブロック座標の通行可否を答える
pub trait CollisionOracle {
    fn query(&self, cell: BlockCell) -> BlockKind;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingOutcome {
    OriginalSafe(Point3),
    AlternativeFound(Point3),
    NoneFound,
}

/// 足元と頭の2ブロックがどちらも Solid でなければ安全
pub fn is_safe<O: CollisionOracle + ?Sized>(oracle: &O, point: Point3) -> bool {
    let cell = point.block_cell();
    let feet = oracle.query(cell);
    let head = oracle.query(cell.above());
    !feet.is_solid() && !head.is_solid()
}

/// reference を中心に距離の近い順、方向の表の順で並んだ候補地点
pub fn ring_candidates(reference: Point3) -> impl Iterator<Item = Point3> {
    SEARCH_DISTANCES.flat_map(move |distance| {
        CANDIDATE_OFFSETS.into_iter().map(move |(dx, dz)| {
            reference.offset((dx * distance) as f64, 0.0, (dz * distance) as f64)
        })
    })
}

/// desired が塞がっていれば reference 周辺から最初に見つかった安全地点を返す
pub fn resolve<O: CollisionOracle + ?Sized>(
    reference: Point3,
    desired: Point3,
    oracle: &O,
) -> LandingOutcome {
    if is_safe(oracle, desired) {
        return LandingOutcome::OriginalSafe(desired);
    }
    ring_candidates(reference)
        .find(|candidate| is_safe(oracle, *candidate))
        .map_or(LandingOutcome::NoneFound, LandingOutcome::AlternativeFound)
}

/// 固定のブロック配置を返すテスト用オラクル。問い合わせ履歴を記録する
pub struct DummyCollisionOracle {
    blocks: HashMap<BlockCell, BlockKind>,
    fallback: BlockKind,
    queried: RefCell<Vec<BlockCell>>,
}

impl DummyCollisionOracle {
    pub fn new() -> Self {
        Self::filled_with(BlockKind::Empty)
    }

    pub fn filled_with(fallback: BlockKind) -> Self {
        Self {
            blocks: HashMap::new(),
            fallback,
            queried: RefCell::new(Vec::new()),
        }
    }

    pub fn set_block(&mut self, cell: BlockCell, kind: BlockKind) {
        self.blocks.insert(cell, kind);
    }

    /// cell とその1つ上をまとめて設定する
    pub fn set_column(&mut self, cell: BlockCell, kind: BlockKind) {
        self.set_block(cell, kind);
        self.set_block(cell.above(), kind);
    }

    pub fn queried(&self) -> Vec<BlockCell> {
        self.queried.borrow().clone()
    }
}

impl CollisionOracle for DummyCollisionOracle {
    fn query(&self, cell: BlockCell) -> BlockKind {
        self.queried.borrow_mut().push(cell);
        *self.blocks.get(&cell).unwrap_or(&self.fallback)
    }
}
