//! Visual theming for the graph canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parse `#rrggbb`, `#rgb`, `rgb(...)` or `rgba(...)`. Anything else is
	/// `None`, so callers can fall back to a theme color.
	pub fn parse(css: &str) -> Option<Self> {
		let css = css.trim();
		if let Some(hex) = css.strip_prefix('#') {
			if !hex.is_ascii() {
				return None;
			}
			let channel = |s: &str| u8::from_str_radix(s, 16).ok();
			return match hex.len() {
				6 => Some(Self::rgb(
					channel(&hex[0..2])?,
					channel(&hex[2..4])?,
					channel(&hex[4..6])?,
				)),
				3 => {
					let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
					Some(Self::rgb(short(0)?, short(1)?, short(2)?))
				}
				_ => None,
			};
		}
		if css.starts_with("rgb") {
			let inner = css
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')');
			let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
			let r = parts.first()?.parse().ok()?;
			let g = parts.get(1)?.parse().ok()?;
			let b = parts.get(2)?.parse().ok()?;
			let a = parts.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);
			return Some(Self::rgba(r, g, b, a));
		}
		match css {
			"green" => Some(Self::rgb(0, 128, 0)),
			"black" => Some(Self::rgb(0, 0, 0)),
			"white" => Some(Self::rgb(255, 255, 255)),
			_ => None,
		}
	}
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill used when a node has no color of its own.
	pub color: Color,
	/// Screen pixels per unit of node `size`.
	pub size_scale: f64,
	pub border_width: f64,
	pub border_color: Color,
	/// Ring drawn around highlighted nodes.
	pub highlight_color: Color,
	pub highlight_width: f64,
	/// Fill of nodes greyed out by hover or search.
	pub dim_color: Color,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Screen pixels per unit of edge `size`.
	pub size_scale: f64,
	/// Arrow head length, in multiples of the line width.
	pub arrow_ratio: f64,
}

/// Label visual style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	pub font: String,
	/// Nodes drawn smaller than this (screen radius) hide their label unless
	/// it is forced.
	pub min_radius: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: Color,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	pub label: LabelStyle,
	/// Screen padding kept around the graph when fitting it to the canvas.
	pub padding: f64,
}

impl Theme {
	/// White canvas, grey nodes and edges.
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(255, 255, 255),
			node: NodeStyle {
				color: Color::rgb(153, 153, 153),
				size_scale: 0.5,
				border_width: 1.0,
				border_color: Color::rgb(255, 255, 255),
				highlight_color: Color::rgb(0, 0, 0),
				highlight_width: 2.0,
				dim_color: Color::rgb(246, 246, 246),
			},
			edge: EdgeStyle {
				color: Color::rgb(204, 204, 204),
				size_scale: 1.0,
				arrow_ratio: 2.5,
			},
			label: LabelStyle {
				color: Color::rgb(0, 0, 0),
				font: "12px sans-serif".into(),
				min_radius: 4.0,
			},
			padding: 40.0,
		}
	}

	/// Dark canvas for dark host pages.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: Color::rgb(22, 27, 34),
			node: NodeStyle {
				color: Color::rgb(94, 129, 172),
				size_scale: 0.5,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				highlight_color: Color::rgb(255, 255, 255),
				highlight_width: 2.0,
				dim_color: Color::rgb(48, 54, 61),
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.6),
				size_scale: 1.0,
				arrow_ratio: 2.5,
			},
			label: LabelStyle {
				color: Color::rgba(255, 255, 255, 0.85),
				font: "12px sans-serif".into(),
				min_radius: 4.0,
			},
			padding: 40.0,
		}
	}

	/// Built-in theme by name, as given in the page URL.
	pub fn named(name: &str) -> Option<Self> {
		match name {
			"light" => Some(Self::light()),
			"dark" => Some(Self::dark()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
