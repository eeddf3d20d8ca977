//! Terrain kinds and their glyphs.

/// The category of a grid cell. Only [`Open`](TerrainKind::Open) cells can be
/// walked through; every other kind is an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TerrainKind {
    #[default]
    Open,
    Water,
    Building,
    Pothole,
}

impl TerrainKind {
    /// The impassable kinds, in hotkey order.
    pub const OBSTACLES: [TerrainKind; 3] =
        [TerrainKind::Water, TerrainKind::Building, TerrainKind::Pothole];

    /// Whether this terrain can be walked through.
    #[inline]
    pub fn is_open(self) -> bool {
        self == TerrainKind::Open
    }

    /// Character used for this terrain in ASCII layouts.
    pub fn glyph(self) -> char {
        match self {
            TerrainKind::Open => '.',
            TerrainKind::Water => '~',
            TerrainKind::Building => '#',
            TerrainKind::Pothole => 'o',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(TerrainKind::Open),
            '~' => Some(TerrainKind::Water),
            '#' => Some(TerrainKind::Building),
            'o' => Some(TerrainKind::Pothole),
            _ => None,
        }
    }

    /// Obstacle bound to an editor number key: `1` water, `2` building,
    /// `3` pothole.
    pub fn from_hotkey(key: char) -> Option<Self> {
        match key {
            '1' => Some(TerrainKind::Water),
            '2' => Some(TerrainKind::Building),
            '3' => Some(TerrainKind::Pothole),
            _ => None,
        }
    }

    /// Lowercase name, as used in edit scripts and config files.
    pub fn name(self) -> &'static str {
        match self {
            TerrainKind::Open => "open",
            TerrainKind::Water => "water",
            TerrainKind::Building => "building",
            TerrainKind::Pothole => "pothole",
        }
    }

    /// Parse a name produced by [`name`](Self::name), ignoring case.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Some(TerrainKind::Open),
            "water" => Some(TerrainKind::Water),
            "building" => Some(TerrainKind::Building),
            "pothole" => Some(TerrainKind::Pothole),
            _ => None,
        }
    }
}
