// src/normalize/shape.rs

use serde_json::{json, Map, Value};
use tracing::warn;

use super::family::FamilyConfig;
use super::hierarchy::{Dataset, Entity};

/// The two response shapes the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{"Total": ..., "itens": [...]}` — document order, every row kept.
    Flat,
    /// `{"<root>": {"<name>": {...}}, "totalGeral": ...}` — keyed by
    /// category name for O(1) lookup; orphans dropped.
    Hierarchical,
}

impl Shape {
    /// Accepts the API codes plus the legacy Portuguese spellings.
    pub fn parse(code: &str) -> Option<Shape> {
        match code.trim().to_lowercase().as_str() {
            "flat" | "padrao" => Some(Shape::Flat),
            "hierarchical" | "hierarquico" => Some(Shape::Hierarchical),
            _ => None,
        }
    }
}

pub fn render(dataset: &Dataset, config: &FamilyConfig, shape: Shape) -> Value {
    match shape {
        Shape::Flat => render_flat(dataset, config),
        Shape::Hierarchical => render_hierarchical(dataset, config),
    }
}

/// Total renders as a bare number, or as a quantity/value pair for the
/// families that carry a currency column.
fn total_json(total: &Entity, config: &FamilyConfig) -> Value {
    if config.has_value {
        json!({
            "quantidade": total.quantity,
            "valor": total.value.unwrap_or(0.0),
        })
    } else {
        json!(total.quantity)
    }
}

fn flat_item(entity: &Entity, config: &FamilyConfig, subitem: Vec<Value>) -> Value {
    let mut item = Map::new();
    item.insert("produto".to_string(), json!(entity.name));
    item.insert("quantidade".to_string(), json!(entity.quantity));
    if config.has_value {
        item.insert("valor".to_string(), json!(entity.value.unwrap_or(0.0)));
    }
    item.insert("subitem".to_string(), Value::Array(subitem));
    Value::Object(item)
}

fn render_flat(dataset: &Dataset, config: &FamilyConfig) -> Value {
    let mut itens = Vec::new();

    if config.nested {
        for entity in &dataset.entities {
            if entity.is_parent {
                if config.ignored.contains(&entity.name.as_str()) {
                    continue;
                }
                let subitem = dataset
                    .entities
                    .iter()
                    .filter(|c| !c.is_parent && c.parent.as_deref() == Some(entity.name.as_str()))
                    .map(|c| json!({"produto": c.name, "quantidade": c.quantity}))
                    .collect();
                itens.push(flat_item(entity, config, subitem));
            } else if entity.parent.is_none() {
                // orphan: no parent row preceded it; kept in the flat view
                itens.push(flat_item(entity, config, Vec::new()));
            }
        }
    } else {
        // country families: every row is its own item
        for entity in &dataset.entities {
            if config.ignored.contains(&entity.name.as_str()) {
                continue;
            }
            itens.push(flat_item(entity, config, Vec::new()));
        }
    }

    json!({
        "Total": total_json(&dataset.total, config),
        "itens": itens,
    })
}

fn hierarchical_child(child: &Entity, config: &FamilyConfig) -> Value {
    let mut entry = Map::new();
    entry.insert(config.key_label.to_string(), json!(child.name));
    entry.insert(config.quantity_key.to_string(), json!(child.quantity));
    if let Some(detail_key) = config.detail_key {
        entry.insert(detail_key.to_string(), json!(child.detail));
    }
    Value::Object(entry)
}

fn render_hierarchical(dataset: &Dataset, config: &FamilyConfig) -> Value {
    let mut root = Map::new();

    if config.nested {
        for parent in dataset.entities.iter().filter(|e| e.is_parent) {
            let children: Vec<Value> = dataset
                .entities
                .iter()
                .filter(|c| !c.is_parent && c.parent.as_deref() == Some(parent.name.as_str()))
                .map(|c| hierarchical_child(c, config))
                .collect();
            let mut entry = Map::new();
            entry.insert(config.quantity_key.to_string(), json!(parent.quantity));
            entry.insert(config.children_key.to_string(), Value::Array(children));
            if root.insert(parent.name.clone(), Value::Object(entry)).is_some() {
                // duplicate category name across sub-tables; earlier data lost
                warn!(parent = %parent.name, "duplicate parent overwritten in hierarchical shape");
            }
        }
    } else {
        for entity in &dataset.entities {
            let entry = json!({
                "quantidade": entity.quantity,
                "valor": entity.value.unwrap_or(0.0),
            });
            if root.insert(entity.name.clone(), entry).is_some() {
                warn!(name = %entity.name, "duplicate country overwritten in hierarchical shape");
            }
        }
    }

    let mut doc = Map::new();
    doc.insert(config.hierarchy_root.to_string(), Value::Object(root));
    doc.insert("totalGeral".to_string(), total_json(&dataset.total, config));
    Value::Object(doc)
}
