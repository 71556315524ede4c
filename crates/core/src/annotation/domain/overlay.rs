use crate::shared::region::Region;

/// 8-bit color in the frame's BGR channel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const GREEN: Color = Color::bgr(0, 255, 0);
    pub const BLUE: Color = Color::bgr(255, 0, 0);
    pub const RED: Color = Color::bgr(0, 0, 255);
    pub const YELLOW: Color = Color::bgr(0, 255, 255);

    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// One drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Rectangle outline.
    Rect {
        region: Region,
        color: Color,
        thickness: i32,
    },
    /// Filled circle.
    Dot {
        center: (i32, i32),
        radius: i32,
        color: Color,
    },
    /// Text with its baseline starting at `origin`.
    Text {
        text: String,
        origin: (i32, i32),
        scale: f64,
        color: Color,
        thickness: i32,
    },
}

/// Shapes drawn onto one frame, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    shapes: Vec<Shape>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&mut self, region: Region, color: Color, thickness: i32) {
        self.shapes.push(Shape::Rect {
            region,
            color,
            thickness,
        });
    }

    pub fn dot(&mut self, center: (i32, i32), radius: i32, color: Color) {
        self.shapes.push(Shape::Dot {
            center,
            radius,
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, origin: (i32, i32), color: Color) {
        self.shapes.push(Shape::Text {
            text: text.into(),
            origin,
            scale: 1.0,
            color,
            thickness: 2,
        });
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
