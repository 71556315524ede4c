/// An axis-aligned detection rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Rows `y + h/2 .. y + h`: the mouth half of a face box.
    ///
    /// For odd heights the lower half gets the extra row.
    pub fn lower_half(&self) -> Region {
        let top = self.height / 2;
        Region {
            x: self.x,
            y: self.y + top,
            width: self.width,
            height: self.height - top,
        }
    }

    /// Moves a region found inside an ROI back into frame coordinates.
    pub fn translate(&self, dx: i32, dy: i32) -> Region {
        Region {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Intersection with a `width` x `height` image; empty when disjoint.
    pub fn clamp_to(&self, width: u32, height: u32) -> Region {
        let x1 = self.x.clamp(0, width as i32);
        let y1 = self.y.clamp(0, height as i32);
        let x2 = (self.x + self.width).clamp(0, width as i32);
        let y2 = (self.y + self.height).clamp(0, height as i32);
        Region {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0),
            height: (y2 - y1).max(0),
        }
    }
}
