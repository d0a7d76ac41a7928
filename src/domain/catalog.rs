use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One `layers` row: a layer material priced for a single mattress size.
/// A layer type therefore spans several rows, one per size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRow {
    /// Store-assigned row key; distinct from `layer_id`, which groups
    /// the per-size rows of one layer type.
    #[serde(default)]
    pub row_id: u64,
    pub layer_id: u32,
    pub layer_name: String,
    pub size: String,
    pub price: f64,
    pub available_heights: Vec<u32>,
    pub icon_path: String,
    pub slug: String,
}

/// One `covers` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverRow {
    /// Store-assigned row key.
    #[serde(default)]
    pub row_id: u64,
    pub cover_id: u32,
    pub cover_name: String,
    pub price: f64,
    pub slug: String,
    pub icon_path: String,
}

/// Layer as the configurator consumes it: one entry per layer type with
/// its per-size price table.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: u32,
    pub name: String,
    pub prices: BTreeMap<String, f64>,
    pub available_heights: Vec<u32>,
    pub icon: String,
    pub slug: String,
}

/// Cover as the configurator consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub slug: String,
    pub icon: String,
}

/// Groups per-size layer rows into one `Layer` per layer type,
/// preserving the order in which layer ids first appear.
pub fn layers_from_rows(rows: &[LayerRow]) -> Vec<Layer> {
    let mut layers: Vec<Layer> = Vec::new();
    let mut index_by_id: HashMap<u32, usize> = HashMap::new();

    for row in rows {
        let index = *index_by_id.entry(row.layer_id).or_insert_with(|| {
            layers.push(Layer {
                id: row.layer_id,
                name: row.layer_name.clone(),
                prices: BTreeMap::new(),
                available_heights: row.available_heights.clone(),
                icon: row.icon_path.clone(),
                slug: row.slug.clone(),
            });
            layers.len() - 1
        });
        layers[index].prices.insert(row.size.clone(), row.price);
    }

    layers
}

pub fn covers_from_rows(rows: &[CoverRow]) -> Vec<Cover> {
    rows.iter()
        .map(|row| Cover {
            id: row.cover_id,
            name: row.cover_name.clone(),
            price: row.price,
            slug: row.slug.clone(),
            icon: row.icon_path.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_row(layer_id: u32, name: &str, size: &str, price: f64) -> LayerRow {
        LayerRow {
            row_id: 0,
            layer_id,
            layer_name: name.to_string(),
            size: size.to_string(),
            price,
            available_heights: vec![4, 6],
            icon_path: format!("/layers/{layer_id}.png"),
            slug: name.to_lowercase().replace(' ', "-"),
        }
    }

    #[test]
    fn groups_sizes_under_one_layer() {
        let rows = vec![
            layer_row(1, "Studená pěna", "90x200", 1500.0),
            layer_row(1, "Studená pěna", "160x200", 2600.0),
            layer_row(2, "Latex", "90x200", 2900.0),
        ];

        let layers = layers_from_rows(&rows);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].prices.get("90x200"), Some(&1500.0));
        assert_eq!(layers[0].prices.get("160x200"), Some(&2600.0));
        assert_eq!(layers[1].name, "Latex");
    }

    #[test]
    fn preserves_first_seen_layer_order() {
        let rows = vec![
            layer_row(3, "Kokos", "90x200", 1800.0),
            layer_row(1, "Studená pěna", "90x200", 1500.0),
            layer_row(3, "Kokos", "160x200", 3100.0),
        ];

        let layers = layers_from_rows(&rows);
        assert_eq!(layers.iter().map(|l| l.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn covers_map_one_to_one() {
        let rows = vec![CoverRow {
            row_id: 0,
            cover_id: 7,
            cover_name: "Bavlněný potah".to_string(),
            price: 900.0,
            slug: "bavlneny-potah".to_string(),
            icon_path: "/covers/7.png".to_string(),
        }];

        let covers = covers_from_rows(&rows);
        assert_eq!(covers.len(), 1);
        assert_eq!(covers[0].id, 7);
        assert_eq!(covers[0].icon, "/covers/7.png");
    }
}
