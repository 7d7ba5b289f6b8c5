//! Named colour lookup tables and linear interpolation between their
//! entries.
//!
//! The tables are nine-stop resamplings of the matplotlib and seaborn
//! perceptually uniform maps of the same names, evenly spaced from the
//! bottom of the map to the top.  The first and last stops are the
//! exact end colours of the originals.

use error::Error;
use std::fmt;
use std::str::FromStr;

/// An RGB triple with every channel in `[0, 1]`.
pub type Rgb = [f64; 3];

static VIRIDIS: [Rgb; 9] = [
    [0.267004, 0.004874, 0.329415],
    [0.282327, 0.140926, 0.457517],
    [0.229739, 0.322361, 0.545706],
    [0.163625, 0.471133, 0.558148],
    [0.127568, 0.566949, 0.550556],
    [0.166383, 0.690856, 0.496502],
    [0.369214, 0.788888, 0.382914],
    [0.678489, 0.863742, 0.189503],
    [0.993248, 0.906157, 0.143936],
];

static INFERNO: [Rgb; 9] = [
    [0.001462, 0.000466, 0.013866],
    [0.087411, 0.044556, 0.224813],
    [0.258234, 0.038571, 0.406485],
    [0.416331, 0.090203, 0.432943],
    [0.578304, 0.148039, 0.404411],
    [0.735683, 0.215906, 0.330245],
    [0.865006, 0.316822, 0.226055],
    [0.954506, 0.468744, 0.099874],
    [0.988362, 0.998364, 0.644924],
];

static PLASMA: [Rgb; 9] = [
    [0.050383, 0.029803, 0.527975],
    [0.287076, 0.010855, 0.627295],
    [0.494877, 0.011990, 0.657865],
    [0.665129, 0.138566, 0.585123],
    [0.798216, 0.280197, 0.469538],
    [0.899323, 0.425105, 0.360171],
    [0.973416, 0.585761, 0.251540],
    [0.994141, 0.765071, 0.155837],
    [0.940015, 0.975158, 0.131326],
];

static MAGMA: [Rgb; 9] = [
    [0.001462, 0.000466, 0.013866],
    [0.113094, 0.065492, 0.276784],
    [0.316654, 0.071690, 0.485380],
    [0.512831, 0.148179, 0.507648],
    [0.716387, 0.214982, 0.475290],
    [0.904281, 0.319610, 0.388137],
    [0.987622, 0.535621, 0.382141],
    [0.995737, 0.761914, 0.532139],
    [0.987053, 0.991438, 0.749504],
];

static ROCKET: [Rgb; 9] = [
    [0.010608, 0.018082, 0.100187],
    [0.165117, 0.071000, 0.200000],
    [0.336429, 0.089000, 0.297000],
    [0.530000, 0.106000, 0.339000],
    [0.725000, 0.111000, 0.333000],
    [0.886000, 0.218000, 0.282000],
    [0.953000, 0.425000, 0.318000],
    [0.963000, 0.653000, 0.526000],
    [0.981377, 0.920617, 0.865369],
];

static MAKO: [Rgb; 9] = [
    [0.045039, 0.014823, 0.020922],
    [0.156000, 0.097000, 0.213000],
    [0.238000, 0.191000, 0.376000],
    [0.239000, 0.302000, 0.540000],
    [0.209000, 0.437000, 0.608000],
    [0.205000, 0.566000, 0.639000],
    [0.248000, 0.698000, 0.671000],
    [0.462000, 0.828000, 0.682000],
    [0.870566, 0.960067, 0.888970],
];

/// The built-in palettes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Dark purple through teal to yellow.
    Viridis,
    /// Black through purple and orange to pale yellow.
    Inferno,
    /// Deep blue through magenta to yellow.
    Plasma,
    /// Black through purple and salmon to cream.
    Magma,
    /// Near-black through crimson to cream.
    Rocket,
    /// Near-black through blue and teal to mint.
    Mako,
}

impl Palette {
    /// Every palette, in the order they are listed to users.
    pub const ALL: [Palette; 6] = [
        Palette::Viridis,
        Palette::Inferno,
        Palette::Plasma,
        Palette::Magma,
        Palette::Rocket,
        Palette::Mako,
    ];

    /// The name the palette is selected by.
    pub fn name(self) -> &'static str {
        match self {
            Palette::Viridis => "viridis",
            Palette::Inferno => "inferno",
            Palette::Plasma => "plasma",
            Palette::Magma => "magma",
            Palette::Rocket => "rocket",
            Palette::Mako => "mako",
        }
    }

    /// The palette's lookup table, darkest entry first.
    pub fn table(self) -> &'static [Rgb] {
        match self {
            Palette::Viridis => &VIRIDIS,
            Palette::Inferno => &INFERNO,
            Palette::Plasma => &PLASMA,
            Palette::Magma => &MAGMA,
            Palette::Rocket => &ROCKET,
            Palette::Mako => &MAKO,
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .iter()
            .find(|p| p.name() == s)
            .cloned()
            .ok_or_else(|| Error::UnknownPalette(s.to_string()))
    }
}

/// A palette stretched over an input range.
#[derive(Copy, Clone, Debug)]
pub struct Colormap {
    table: &'static [Rgb],
    vmin: f64,
    vmax: f64,
}

impl Colormap {
    /// A colormap over the default range `[0, 1]`.
    pub fn new(palette: Palette) -> Self {
        Colormap {
            table: palette.table(),
            vmin: 0.0,
            vmax: 1.0,
        }
    }

    /// The same palette over `[vmin, vmax]`.
    pub fn with_range(self, vmin: f64, vmax: f64) -> Self {
        Colormap { vmin, vmax, ..self }
    }

    /// Looks up `v`.  Values outside the range are clamped to it; an
    /// empty range, or a value that is not a number, gives the first
    /// entry.
    pub fn map(&self, v: f64) -> Rgb {
        let last = self.table.len() - 1;
        let span = self.vmax - self.vmin;
        let t = if span > 0.0 && span.is_finite() {
            (v - self.vmin) / span
        } else {
            0.0
        };
        let t = if t >= 1.0 {
            1.0
        } else if t > 0.0 {
            t
        } else {
            0.0
        };

        let scaled = t * last as f64;
        let left = scaled as usize;
        if left >= last {
            return self.table[last];
        }
        let frac = scaled - left as f64;
        let (l, r) = (self.table[left], self.table[left + 1]);
        [
            l[0] + (r[0] - l[0]) * frac,
            l[1] + (r[1] - l[1]) * frac,
            l[2] + (r[2] - l[2]) * frac,
        ]
    }
}

/// Converts a channel in `[0, 1]` to a byte.
pub fn to_byte(v: f64) -> u8 {
    let scaled = (256.0 * v) as i64;
    if scaled < 0 {
        0
    } else if scaled > 255 {
        255
    } else {
        scaled as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for p in Palette::ALL.iter() {
            assert_eq!(p.name().parse::<Palette>().unwrap(), *p);
            assert_eq!(p.to_string(), p.name());
        }
    }

    #[test]
    fn unknown_names_fail() {
        match "jet".parse::<Palette>() {
            Err(Error::UnknownPalette(name)) => assert_eq!(name, "jet"),
            other => panic!("unexpected {:?}", other),
        }
        assert!("Viridis".parse::<Palette>().is_err());
    }

    #[test]
    fn viridis_extremes_are_exact() {
        let cmap = Colormap::new(Palette::Viridis).with_range(1.5, 9.25);
        assert_eq!(cmap.map(1.5), VIRIDIS[0]);
        assert_eq!(cmap.map(9.25), VIRIDIS[8]);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let cmap = Colormap::new(Palette::Magma).with_range(0.0, 2.0);
        assert_eq!(cmap.map(-5.0), MAGMA[0]);
        assert_eq!(cmap.map(50.0), MAGMA[8]);
    }

    #[test]
    fn midpoints_interpolate() {
        let cmap = Colormap::new(Palette::Plasma).with_range(0.0, 8.0);
        assert_eq!(cmap.map(3.0), PLASMA[3]);
        let mid = cmap.map(3.5);
        for c in 0..3 {
            let expected = (PLASMA[3][c] + PLASMA[4][c]) / 2.0;
            assert!((mid[c] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_ranges_are_defined() {
        let cmap = Colormap::new(Palette::Mako).with_range(3.0, 3.0);
        assert_eq!(cmap.map(3.0), MAKO[0]);
        assert_eq!(cmap.map(7.0), MAKO[0]);
        let cmap = Colormap::new(Palette::Mako);
        assert_eq!(cmap.map(::std::f64::NAN), MAKO[0]);
    }

    #[test]
    fn tables_are_in_the_unit_cube() {
        for p in Palette::ALL.iter() {
            for rgb in p.table() {
                for c in rgb.iter() {
                    assert!(*c >= 0.0 && *c <= 1.0);
                }
            }
        }
    }

    #[test]
    fn bytes() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(0.5), 128);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(-0.2), 0);
        assert_eq!(to_byte(::std::f64::NAN), 0);
    }
}
