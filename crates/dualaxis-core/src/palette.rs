//! Static color palette table

use serde::{Deserialize, Serialize};

/// A named, ordered list of colors cycled across series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub name: String,
    pub colors: Vec<String>,
}

impl ColorPalette {
    pub fn new(name: impl Into<String>, colors: &[&str]) -> Self {
        Self {
            name: name.into(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Color for the series at `index`, wrapping around the palette
    pub fn color(&self, index: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[index % self.colors.len()].as_str())
    }
}

/// All palettes selectable from the property pane, addressed by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteTable {
    palettes: Vec<ColorPalette>,
}

impl PaletteTable {
    pub fn new(palettes: Vec<ColorPalette>) -> Self {
        Self { palettes }
    }

    pub fn get(&self, id: usize) -> Option<&ColorPalette> {
        self.palettes.get(id)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|p| p.name.as_str())
    }
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self::new(vec![
            ColorPalette::new(
                "distinct",
                &[
                    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f",
                    "#ff7f00", "#cab2d6",
                ],
            ),
            ColorPalette::new(
                "pastel1",
                &[
                    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd",
                    "#fddaec", "#f2f2f2",
                ],
            ),
            ColorPalette::new(
                "contrast",
                &[
                    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628",
                    "#f781bf", "#999999",
                ],
            ),
            ColorPalette::new(
                "pastel2",
                &[
                    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69",
                    "#fccde5", "#d9d9d9",
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let table = PaletteTable::default();
        assert_eq!(table.len(), 4);
        for id in 0..table.len() {
            assert_eq!(table.get(id).unwrap().colors.len(), 9);
        }
        assert_eq!(
            table.names().collect::<Vec<_>>(),
            ["distinct", "pastel1", "contrast", "pastel2"]
        );
    }

    #[test]
    fn test_color_cycles_modulo_length() {
        let palette = ColorPalette::new("four", &["#1", "#2", "#3", "#4"]);
        assert_eq!(palette.color(4), palette.color(0));
        assert_eq!(palette.color(5), palette.color(1));
        assert_eq!(ColorPalette::new("none", &[]).color(0), None);
    }
}
