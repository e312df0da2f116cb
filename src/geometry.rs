/// Axis-aligned rectangles in world units (x grows right, y grows down).

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Square of side `2 * radius` centred on `(cx, cy)`.
    pub fn around(cx: f32, cy: f32, radius: f32) -> Self {
        Rect::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow (positive) or shrink (negative) around the centre.
    /// `dw`/`dh` are the total change, split evenly between both sides.
    pub fn inflate(&self, dw: f32, dh: f32) -> Rect {
        Rect::new(
            self.x - dw / 2.0,
            self.y - dh / 2.0,
            (self.w + dw).max(0.0),
            (self.h + dh).max(0.0),
        )
    }
}
