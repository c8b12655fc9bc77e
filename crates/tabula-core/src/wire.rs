//! Flat wire representation of a project and the projection in and out.
//!
//! The backend stores blocks with a positional `order` integer (`null` for
//! sidebar blocks) and task cells as `{value, type}` pairs; the in-memory
//! model keeps an explicit ordered id list instead. Server data is not
//! trusted to satisfy the cell invariants, so projection re-syncs every
//! active block after mapping.
//!
//! Saves are a full replace: the entire block and task set is retransmitted
//! every time, and the later save wins wholesale.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::block::{Block, BlockType};
use crate::model::cell::{AttachmentCell, CellValue};
use crate::model::project::Project;
use crate::model::row::{Row, TaskStatus};

/// A block as the backend stores it: ordering is a positional integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBlock {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub order: Option<i64>,
}

/// A cell as the backend stores it: a JSON value plus its declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCell {
    pub value: Value,
    #[serde(rename = "type")]
    pub cell_type: BlockType,
}

/// A task row as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTask {
    pub id: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub cells: BTreeMap<String, WireCell>,
}

/// A project as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireProject {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(
        default,
        rename = "departmentId",
        skip_serializing_if = "Option::is_none"
    )]
    pub department_id: Option<String>,
    #[serde(default)]
    pub blocks: Vec<WireBlock>,
    #[serde(default)]
    pub tasks: Vec<WireTask>,
}

/// The body of a full-replace save (`PUT /projects/:id/save`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSave {
    pub blocks: Vec<WireBlock>,
    pub tasks: Vec<WireTask>,
}

/// Project the wire shape into the in-memory model.
///
/// The workspace order is reconstructed by keeping blocks with
/// `order >= 0`, sorting ascending (ties broken by block list position) and
/// deduping. Cells for blocks outside the reconstructed order are
/// discarded; cells missing for blocks inside it are seeded with defaults.
#[must_use]
pub fn project_from_wire(wire: WireProject) -> Project {
    let mut ordered: Vec<(i64, usize, &str)> = wire
        .blocks
        .iter()
        .enumerate()
        .filter_map(|(position, block)| match block.order {
            Some(order) if order >= 0 => Some((order, position, block.id.as_str())),
            _ => None,
        })
        .collect();
    ordered.sort_unstable();

    let mut workspace_order: Vec<String> = Vec::with_capacity(ordered.len());
    for (_, _, block_id) in ordered {
        if !workspace_order.iter().any(|id| id == block_id) {
            workspace_order.push(block_id.to_string());
        }
    }

    let blocks: Vec<Block> = wire
        .blocks
        .iter()
        .map(|block| Block {
            id: block.id.clone(),
            label: block.label.clone(),
            block_type: block.block_type,
            color: block.color.clone(),
        })
        .collect();

    let rows: Vec<Row> = wire
        .tasks
        .into_iter()
        .map(|task| {
            let mut row = Row::new(task.id);
            row.status = task.status;
            for (block_id, cell) in task.cells {
                if !workspace_order.iter().any(|id| id == &block_id) {
                    tracing::debug!(block_id = %block_id, "dropping cell for inactive block");
                    continue;
                }
                row.cells
                    .insert(block_id, coerce_cell_value(&cell.value, cell.cell_type));
            }
            row
        })
        .collect();

    let mut project = Project {
        id: wire.id,
        name: wire.name,
        owner_id: wire.user_id,
        department_id: wire.department_id,
        blocks,
        workspace_order,
        rows,
    };

    let active: Vec<String> = project.workspace_order.clone();
    for block_id in &active {
        project.sync_cells_for_block(block_id);
    }
    project
}

/// Serialize the in-memory model back to the wire shape.
///
/// Block `order` becomes the index in the workspace order, or `null` for
/// sidebar blocks. Cells whose block no longer exists are dropped.
#[must_use]
pub fn project_to_wire(project: &Project) -> WireProject {
    let blocks: Vec<WireBlock> = project
        .blocks
        .iter()
        .map(|block| WireBlock {
            id: block.id.clone(),
            label: block.label.clone(),
            block_type: block.block_type,
            color: block.color.clone(),
            order: project
                .workspace_order
                .iter()
                .position(|id| id == &block.id)
                .and_then(|index| i64::try_from(index).ok()),
        })
        .collect();

    let tasks: Vec<WireTask> = project
        .rows
        .iter()
        .map(|row| task_to_wire(project, row))
        .collect();

    WireProject {
        id: project.id.clone(),
        name: project.name.clone(),
        user_id: project.owner_id.clone(),
        department_id: project.department_id.clone(),
        blocks,
        tasks,
    }
}

/// Flatten one row to the wire shape, typing each cell from its block.
/// Cells whose block no longer exists are dropped.
#[must_use]
pub fn task_to_wire(project: &Project, row: &Row) -> WireTask {
    WireTask {
        id: row.id.clone(),
        status: row.status,
        cells: row
            .cells
            .iter()
            .filter_map(|(block_id, value)| {
                let block = project.block(block_id)?;
                Some((
                    block_id.clone(),
                    WireCell {
                        value: serde_json::to_value(value).unwrap_or(Value::Null),
                        cell_type: block.block_type,
                    },
                ))
            })
            .collect(),
    }
}

/// The save body for a project: the full block and task set.
#[must_use]
pub fn save_body(project: &Project) -> WireSave {
    let wire = project_to_wire(project);
    WireSave {
        blocks: wire.blocks,
        tasks: wire.tasks,
    }
}

/// Coerce a raw wire value into the shape its declared type requires.
///
/// Numeric strings parse to numbers for `number` cells; attachment objects
/// decode for `file`/`report` cells; everything else is stringified.
/// Unusable values fall back to the type default.
fn coerce_cell_value(value: &Value, cell_type: BlockType) -> CellValue {
    match cell_type {
        BlockType::Number => match value {
            Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_or_else(|_| cell_type.default_cell(), CellValue::Number),
            _ => cell_type.default_cell(),
        },
        BlockType::File | BlockType::Report => serde_json::from_value::<AttachmentCell>(
            value.clone(),
        )
        .map_or_else(|_| cell_type.default_cell(), CellValue::Attachment),
        BlockType::Text | BlockType::Date | BlockType::Control => match value {
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Null => CellValue::Text(String::new()),
            other => CellValue::Text(other.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{WireBlock, WireCell, WireProject, WireTask, project_from_wire, project_to_wire};
    use crate::model::block::BlockType;
    use crate::model::cell::{AttachmentKind, CellValue};
    use crate::model::row::TaskStatus;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn wire_block(id: &str, block_type: BlockType, order: Option<i64>) -> WireBlock {
        WireBlock {
            id: id.to_string(),
            label: id.to_string(),
            block_type,
            color: "#ffffff".to_string(),
            order,
        }
    }

    #[test]
    fn order_is_reconstructed_sorted_ascending() {
        let wire = WireProject {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            user_id: None,
            department_id: None,
            blocks: vec![
                wire_block("a", BlockType::Text, Some(2)),
                wire_block("b", BlockType::Text, None),
                wire_block("c", BlockType::Text, Some(0)),
                wire_block("d", BlockType::Text, Some(-1)),
            ],
            tasks: Vec::new(),
        };
        let project = project_from_wire(wire);
        assert_eq!(project.workspace_order, ["c", "a"]);
        assert_eq!(project.blocks.len(), 4);
    }

    #[test]
    fn equal_orders_keep_block_list_position() {
        let wire = WireProject {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            user_id: None,
            department_id: None,
            blocks: vec![
                wire_block("x", BlockType::Text, Some(1)),
                wire_block("y", BlockType::Text, Some(1)),
            ],
            tasks: Vec::new(),
        };
        assert_eq!(project_from_wire(wire).workspace_order, ["x", "y"]);
    }

    #[test]
    fn projection_seeds_missing_cells() {
        let wire = WireProject {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            user_id: None,
            department_id: None,
            blocks: vec![wire_block("deadline", BlockType::Date, Some(0))],
            tasks: vec![WireTask {
                id: "t1".to_string(),
                status: TaskStatus::Submitted,
                cells: BTreeMap::new(),
            }],
        };
        let project = project_from_wire(wire);
        assert!(project.check_invariants().is_ok());
        assert_eq!(
            project.rows[0].cell("deadline"),
            Some(&CellValue::Text(String::new()))
        );
        assert_eq!(project.rows[0].status, TaskStatus::Submitted);
    }

    #[test]
    fn cells_for_inactive_blocks_are_discarded() {
        let mut cells = BTreeMap::new();
        cells.insert(
            "hidden".to_string(),
            WireCell {
                value: json!("stale"),
                cell_type: BlockType::Text,
            },
        );
        let wire = WireProject {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            user_id: None,
            department_id: None,
            blocks: vec![wire_block("hidden", BlockType::Text, None)],
            tasks: vec![WireTask {
                id: "t1".to_string(),
                status: TaskStatus::NotSubmitted,
                cells,
            }],
        };
        assert!(project_from_wire(wire).rows[0].cell("hidden").is_none());
    }

    #[test]
    fn numeric_strings_parse_for_number_cells() {
        let mut cells = BTreeMap::new();
        cells.insert(
            "budget".to_string(),
            WireCell {
                value: json!("42.5"),
                cell_type: BlockType::Number,
            },
        );
        cells.insert(
            "note".to_string(),
            WireCell {
                value: json!(7),
                cell_type: BlockType::Text,
            },
        );
        let wire = WireProject {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            user_id: None,
            department_id: None,
            blocks: vec![
                wire_block("budget", BlockType::Number, Some(0)),
                wire_block("note", BlockType::Text, Some(1)),
            ],
            tasks: vec![WireTask {
                id: "t1".to_string(),
                status: TaskStatus::NotSubmitted,
                cells,
            }],
        };
        let project = project_from_wire(wire);
        assert_eq!(project.rows[0].cell("budget"), Some(&CellValue::Number(42.5)));
        assert_eq!(
            project.rows[0].cell("note"),
            Some(&CellValue::Text("7".to_string()))
        );
    }

    #[test]
    fn unusable_values_fall_back_to_defaults() {
        let mut cells = BTreeMap::new();
        cells.insert(
            "budget".to_string(),
            WireCell {
                value: json!("not a number"),
                cell_type: BlockType::Number,
            },
        );
        cells.insert(
            "doc".to_string(),
            WireCell {
                value: json!(true),
                cell_type: BlockType::File,
            },
        );
        let wire = WireProject {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            user_id: None,
            department_id: None,
            blocks: vec![
                wire_block("budget", BlockType::Number, Some(0)),
                wire_block("doc", BlockType::File, Some(1)),
            ],
            tasks: vec![WireTask {
                id: "t1".to_string(),
                status: TaskStatus::NotSubmitted,
                cells,
            }],
        };
        let project = project_from_wire(wire);
        assert_eq!(project.rows[0].cell("budget"), Some(&CellValue::Number(0.0)));
        let attachment = project.rows[0]
            .cell("doc")
            .and_then(|c| c.as_attachment())
            .unwrap();
        assert_eq!(attachment.kind, AttachmentKind::None);
    }

    #[test]
    fn serialization_writes_positional_orders() {
        let mut store = crate::store::ProjectStore::new();
        let id = store.create_project("Alpha", Some("u1"), None).unwrap();
        store.move_block_to_workspace(&id, "control").unwrap();
        store.move_block_to_workspace(&id, "deadline").unwrap();
        store.add_row(&id).unwrap();

        let wire = project_to_wire(store.project(&id).unwrap());
        let orders: BTreeMap<&str, Option<i64>> = wire
            .blocks
            .iter()
            .map(|b| (b.id.as_str(), b.order))
            .collect();
        assert_eq!(orders["control"], Some(0));
        assert_eq!(orders["deadline"], Some(1));
        assert_eq!(orders["task-name"], None);
        assert_eq!(orders["document"], None);

        assert_eq!(wire.tasks.len(), 1);
        assert_eq!(wire.tasks[0].cells.len(), 2);
        assert_eq!(wire.tasks[0].cells["deadline"].cell_type, BlockType::Date);
    }

    #[test]
    fn wire_json_field_names_match_the_backend() {
        let wire = WireProject {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            user_id: Some("u1".to_string()),
            department_id: None,
            blocks: vec![wire_block("deadline", BlockType::Date, Some(0))],
            tasks: Vec::new(),
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["userId"], "u1");
        assert!(json.get("departmentId").is_none());
        assert_eq!(json["blocks"][0]["type"], "date");
        assert_eq!(json["blocks"][0]["order"], 0);
    }
}
