//! Rink geometry
//!
//! The playing field is a rectangle with four rounded corners. Goals are
//! centred on the two short edges: the PLAYER defends y = 0, the AI defends
//! y = H. Everything that keeps a circle inside the rink goes through here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tolerance used by containment checks
const EPSILON: f32 = 1e-3;

/// One of the two competitors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human paddle, bottom half, defends y = 0
    Player,
    /// AI paddle, top half, defends y = H
    Ai,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player, Side::Ai];

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Sign of the y axis pointing at this side's own goal
    pub fn goal_direction(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Ai => 1.0,
        }
    }

    /// Sign of the y axis pointing at the opponent's goal
    pub fn attack_direction(self) -> f32 {
        -self.goal_direction()
    }

    /// Half the paddle lives in when it can't cross the midline
    pub fn home_half(self) -> Half {
        match self {
            Side::Player => Half::Bottom,
            Side::Ai => Half::Top,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "PLAYER",
            Side::Ai => "AI",
        }
    }
}

/// Rounded corners, named by rink position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopLeft,
        Corner::TopRight,
    ];
}

/// Vertical region a paddle is confined to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Half {
    Bottom,
    Top,
    /// Whole rink (midline-cross effect)
    Full,
}

/// Where a point sits relative to the rink boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClass {
    /// Inside the straight-edged part of the field
    OnField,
    /// Inside the rounded part of a corner
    InCorner(Corner),
    /// On or past the goal line, within the mouth defended by `Side`
    InGoalMouth(Side),
    /// Outside the rink and not in a goal mouth
    OutOfBounds,
}

/// Current half-widths of both goal mouths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalMouths {
    pub player_half_width: f32,
    pub ai_half_width: f32,
}

impl Default for GoalMouths {
    fn default() -> Self {
        Self {
            player_half_width: GOAL_WIDTH / 2.0,
            ai_half_width: GOAL_WIDTH / 2.0,
        }
    }
}

impl GoalMouths {
    /// Mouths with either goal optionally shrunk
    pub fn with_shrink(player_shrunk: bool, ai_shrunk: bool) -> Self {
        let half = |shrunk: bool| {
            if shrunk {
                GOAL_WIDTH / 2.0 * GOAL_SHRINK_FACTOR
            } else {
                GOAL_WIDTH / 2.0
            }
        };
        Self {
            player_half_width: half(player_shrunk),
            ai_half_width: half(ai_shrunk),
        }
    }

    /// Half-width of the goal defended by `side`
    pub fn half_width(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.player_half_width,
            Side::Ai => self.ai_half_width,
        }
    }
}

/// Rink dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rink {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub goal_width: f32,
    pub goal_height: f32,
}

impl Default for Rink {
    fn default() -> Self {
        Self {
            width: RINK_WIDTH,
            height: RINK_HEIGHT,
            corner_radius: CORNER_RADIUS,
            goal_width: GOAL_WIDTH,
            goal_height: GOAL_HEIGHT,
        }
    }
}

impl Rink {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// y coordinate of the centre line
    pub fn midline(&self) -> f32 {
        self.height / 2.0
    }

    /// y coordinate of the goal line defended by `side`
    pub fn goal_line(&self, side: Side) -> f32 {
        match side {
            Side::Player => 0.0,
            Side::Ai => self.height,
        }
    }

    /// Centre of a corner arc, inset by the corner radius
    pub fn corner_center(&self, corner: Corner) -> Vec2 {
        let r = self.corner_radius;
        match corner {
            Corner::BottomLeft => Vec2::new(r, r),
            Corner::BottomRight => Vec2::new(self.width - r, r),
            Corner::TopLeft => Vec2::new(r, self.height - r),
            Corner::TopRight => Vec2::new(self.width - r, self.height - r),
        }
    }

    /// Corner whose rounded region contains `p` (outside the straight-edge band)
    pub fn corner_at(&self, p: Vec2) -> Option<Corner> {
        let r = self.corner_radius;
        let left = p.x < r;
        let right = p.x > self.width - r;
        let bottom = p.y < r;
        let top = p.y > self.height - r;

        match (left, right, bottom, top) {
            (true, _, true, _) => Some(Corner::BottomLeft),
            (_, true, true, _) => Some(Corner::BottomRight),
            (true, _, _, true) => Some(Corner::TopLeft),
            (_, true, _, true) => Some(Corner::TopRight),
            _ => None,
        }
    }

    /// Outward unit normal of a corner arc at `p`
    ///
    /// When `p` sits exactly on the corner centre the direction is undefined;
    /// fall back to pointing from the rink centre through the corner centre.
    pub fn corner_normal(&self, corner: Corner, p: Vec2) -> Vec2 {
        let center = self.corner_center(corner);
        let offset = p - center;
        if offset.length_squared() > EPSILON * EPSILON {
            offset.normalize()
        } else {
            (center - self.center()).normalize_or_zero()
        }
    }

    /// x-range of the goal mouth defended by `side`
    pub fn goal_span(&self, side: Side, mouths: &GoalMouths) -> (f32, f32) {
        let half = mouths.half_width(side);
        let mid = self.width / 2.0;
        (mid - half, mid + half)
    }

    pub fn in_goal_span(&self, x: f32, side: Side, mouths: &GoalMouths) -> bool {
        let (left, right) = self.goal_span(side, mouths);
        x >= left && x <= right
    }

    /// Classify a point against the rink boundary
    pub fn classify_point(&self, p: Vec2, mouths: &GoalMouths) -> PointClass {
        if p.y <= self.goal_height && self.in_goal_span(p.x, Side::Player, mouths) {
            return PointClass::InGoalMouth(Side::Player);
        }
        if p.y >= self.height - self.goal_height && self.in_goal_span(p.x, Side::Ai, mouths) {
            return PointClass::InGoalMouth(Side::Ai);
        }

        if let Some(corner) = self.corner_at(p) {
            return if p.distance(self.corner_center(corner)) <= self.corner_radius {
                PointClass::InCorner(corner)
            } else {
                PointClass::OutOfBounds
            };
        }

        if p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height {
            PointClass::OnField
        } else {
            PointClass::OutOfBounds
        }
    }

    /// Allowed y-range for the centre of a circle of `radius` in `half`
    pub fn half_bounds(&self, half: Half, radius: f32) -> (f32, f32) {
        let mid = self.midline();
        match half {
            Half::Bottom => (radius, mid - radius),
            Half::Top => (mid + radius, self.height - radius),
            Half::Full => (radius, self.height - radius),
        }
    }

    /// Move a circle centre so the whole circle lies inside `half` of the rink
    ///
    /// Clamp to the half-plane and the straight edges first, then project onto
    /// the arc of radius (R - radius) if the result landed in a corner.
    pub fn constrain(&self, p: Vec2, radius: f32, half: Half) -> Vec2 {
        let (min_y, max_y) = self.half_bounds(half, radius);
        let mut out = Vec2::new(
            p.x.clamp(radius, self.width - radius),
            p.y.clamp(min_y, max_y),
        );

        if let Some(corner) = self.corner_at(out) {
            let center = self.corner_center(corner);
            let limit = self.corner_radius - radius;
            let offset = out - center;
            let dist = offset.length();
            if dist > limit && dist > 0.0 {
                out = center + offset / dist * limit;
            }
        }

        out
    }

    /// Signed distance from `p` to the rounded boundary (negative inside)
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        let half_extents = Vec2::new(self.width, self.height) / 2.0;
        let q = (p - self.center()).abs() - (half_extents - Vec2::splat(self.corner_radius));
        q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - self.corner_radius
    }

    /// Whether a circle lies entirely inside the rink and within `half`
    pub fn contains_circle(&self, p: Vec2, radius: f32, half: Half) -> bool {
        let (min_y, max_y) = self.half_bounds(half, radius);
        self.signed_distance(p) <= -radius + EPSILON
            && p.y >= min_y - EPSILON
            && p.y <= max_y + EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_center_is_on_field() {
        let rink = Rink::default();
        assert_eq!(
            rink.classify_point(rink.center(), &GoalMouths::default()),
            PointClass::OnField
        );
    }

    #[test]
    fn test_classify_corners() {
        let rink = Rink::default();
        let mouths = GoalMouths::default();
        assert_eq!(
            rink.classify_point(Vec2::new(30.0, 30.0), &mouths),
            PointClass::InCorner(Corner::BottomLeft)
        );
        assert_eq!(
            rink.classify_point(Vec2::new(rink.width - 30.0, rink.height - 30.0), &mouths),
            PointClass::InCorner(Corner::TopRight)
        );
        // Square corner tip is outside the rounded boundary
        assert_eq!(
            rink.classify_point(Vec2::new(1.0, 1.0), &mouths),
            PointClass::OutOfBounds
        );
    }

    #[test]
    fn test_classify_goal_mouths() {
        let rink = Rink::default();
        let mouths = GoalMouths::default();
        assert_eq!(
            rink.classify_point(Vec2::new(rink.width / 2.0, 2.0), &mouths),
            PointClass::InGoalMouth(Side::Player)
        );
        assert_eq!(
            rink.classify_point(Vec2::new(rink.width / 2.0, rink.height + 5.0), &mouths),
            PointClass::InGoalMouth(Side::Ai)
        );
        // Just outside the mouth on the goal line is ordinary field
        assert_eq!(
            rink.classify_point(Vec2::new(rink.width / 2.0 + 100.0, 2.0), &mouths),
            PointClass::OnField
        );
    }

    #[test]
    fn test_shrunk_goal_narrows_mouth() {
        let rink = Rink::default();
        let shrunk = GoalMouths::with_shrink(true, false);
        let x = rink.width / 2.0 + 60.0;
        assert!(rink.in_goal_span(x, Side::Player, &GoalMouths::default()));
        assert!(!rink.in_goal_span(x, Side::Player, &shrunk));
        assert!(rink.in_goal_span(x, Side::Ai, &shrunk));
    }

    #[test]
    fn test_constrain_straight_edge() {
        let rink = Rink::default();
        let p = rink.constrain(Vec2::new(-50.0, 200.0), PADDLE_RADIUS, Half::Bottom);
        assert_eq!(p, Vec2::new(PADDLE_RADIUS, 200.0));
    }

    #[test]
    fn test_constrain_half_plane() {
        let rink = Rink::default();
        let p = rink.constrain(Vec2::new(200.0, 600.0), PADDLE_RADIUS, Half::Bottom);
        assert_eq!(p.y, rink.midline() - PADDLE_RADIUS);

        let p = rink.constrain(Vec2::new(200.0, 100.0), PADDLE_RADIUS, Half::Top);
        assert_eq!(p.y, rink.midline() + PADDLE_RADIUS);

        let p = rink.constrain(Vec2::new(200.0, 600.0), PADDLE_RADIUS, Half::Full);
        assert_eq!(p.y, 600.0);
    }

    #[test]
    fn test_constrain_projects_into_corner() {
        let rink = Rink::default();
        let p = rink.constrain(Vec2::new(0.0, 0.0), PADDLE_RADIUS, Half::Bottom);
        let center = rink.corner_center(Corner::BottomLeft);
        let dist = p.distance(center);
        assert!((dist - (rink.corner_radius - PADDLE_RADIUS)).abs() < 1e-3);
        assert!(rink.contains_circle(p, PADDLE_RADIUS, Half::Bottom));
    }

    #[test]
    fn test_constrain_leaves_interior_points_alone() {
        let rink = Rink::default();
        let p = Vec2::new(200.0, 150.0);
        assert_eq!(rink.constrain(p, PADDLE_RADIUS, Half::Bottom), p);
    }

    #[test]
    fn test_corner_normal_fallback_points_away_from_center() {
        let rink = Rink::default();
        let center = rink.corner_center(Corner::TopRight);
        let n = rink.corner_normal(Corner::TopRight, center);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.x > 0.0 && n.y > 0.0);
    }

    #[test]
    fn test_signed_distance() {
        let rink = Rink::default();
        assert!(rink.signed_distance(rink.center()) < 0.0);
        assert!((rink.signed_distance(Vec2::new(0.0, 300.0))).abs() < 1e-3);
        assert!(rink.signed_distance(Vec2::new(-10.0, 300.0)) > 0.0);
        assert!(rink.signed_distance(Vec2::new(2.0, 2.0)) > 0.0);
    }

    fn half_strategy() -> impl Strategy<Value = Half> {
        prop_oneof![Just(Half::Bottom), Just(Half::Top), Just(Half::Full)]
    }

    proptest! {
        #[test]
        fn prop_constrain_keeps_circle_inside(
            x in -200.0f32..650.0,
            y in -200.0f32..900.0,
            radius in prop_oneof![Just(PADDLE_RADIUS), Just(PADDLE_RADIUS * SIZE_BOOST_FACTOR)],
            half in half_strategy(),
        ) {
            let rink = Rink::default();
            let p = rink.constrain(Vec2::new(x, y), radius, half);
            prop_assert!(rink.contains_circle(p, radius, half), "{:?} r={} {:?}", p, radius, half);
        }

        #[test]
        fn prop_constrain_is_idempotent(
            x in -200.0f32..650.0,
            y in -200.0f32..900.0,
            half in half_strategy(),
        ) {
            let rink = Rink::default();
            let once = rink.constrain(Vec2::new(x, y), PADDLE_RADIUS, half);
            let twice = rink.constrain(once, PADDLE_RADIUS, half);
            prop_assert!(once.distance(twice) < 1e-3);
        }
    }
}
