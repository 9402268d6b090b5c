//! Mapping between graph coordinates and canvas pixels.
//!
//! Graph space has y pointing up; the canvas has y pointing down. The camera
//! fits the bounding box of the node positions into the canvas, keeping the
//! aspect ratio and a screen-space padding.

/// Axis-aligned bounds of node positions in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	/// Bounds of a set of points, `None` when empty.
	pub fn of(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points.into_iter().fold(None, |acc, (x, y)| {
			Some(match acc {
				None => Bounds {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			})
		})
	}

	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}
}

/// Graph-to-screen transform: `screen = (gx * k + x, -gy * k + y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub x: f64,
	pub y: f64,
	/// Pixels per graph unit.
	pub k: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl Camera {
	/// Camera that shows `bounds` centered in a `width` x `height` canvas.
	/// A degenerate extent (one node, or a single row) keeps a scale of 1
	/// along that axis.
	pub fn fit(bounds: Bounds, width: f64, height: f64, padding: f64) -> Self {
		let (span_x, span_y) = (bounds.max_x - bounds.min_x, bounds.max_y - bounds.min_y);
		let avail_x = (width - 2.0 * padding).max(1.0);
		let avail_y = (height - 2.0 * padding).max(1.0);
		let k = match (span_x > f64::EPSILON, span_y > f64::EPSILON) {
			(true, true) => (avail_x / span_x).min(avail_y / span_y),
			(true, false) => avail_x / span_x,
			(false, true) => avail_y / span_y,
			(false, false) => 1.0,
		};
		let (cx, cy) = bounds.center();
		Self {
			x: width / 2.0 - cx * k,
			y: height / 2.0 + cy * k,
			k,
		}
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, -gy * self.k + self.y)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, -(sy - self.y) / self.k)
	}
}
