//! Shared fixtures: a submission tree and reference data on disk.
//!
//! [`Submission`] starts from a clean line and is edited per scenario, then
//! written in the raw layer format under a temporary upload root.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use cqline::core::types::LineId;
use cqline::engine::{Pipeline, RunResult};
use cqline::ingest::DirectoryIngest;
use cqline::reference::JsonReferenceStore;

// =============================================================================
// Submission
// =============================================================================

pub const LINE_FIELDS: [&str; 12] = [
    "ID_LINIA", "ID", "DATA", "COMENTARI", "P1", "P2", "P3", "P4", "PF", "ID_FITA1", "ID_FITA2",
    "geometry",
];

#[derive(Debug, Clone)]
pub struct PointSpec {
    pub id: String,
    pub label: String,
    pub coords: Vec<f64>,
    pub photo: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub line: u32,
    pub line_fields: Vec<String>,
    pub segments: Vec<(String, Vec<(f64, f64)>)>,
    pub points: Vec<PointSpec>,
    /// (ID_PUNT, PFF, ESFITA, ORDPF)
    pub proposals: Vec<(String, bool, bool, Option<i64>)>,
    /// (ID_PUNT, ID_FITA, TROBADA, AUX)
    pub found: Vec<(String, String, bool, bool)>,
    pub photos: Vec<String>,
    pub omit: Vec<&'static str>,
}

impl Submission {
    /// Line 42: two segments through four final markers, 3T markers at
    /// both ends, no found markers.
    pub fn clean() -> Self {
        let mut submission = Self {
            line: 42,
            line_fields: LINE_FIELDS.iter().map(|f| f.to_string()).collect(),
            segments: vec![
                ("1".into(), vec![(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]),
                ("2".into(), vec![(20.0, 0.0), (30.0, 5.0)]),
            ],
            points: vec![],
            proposals: vec![],
            found: vec![],
            photos: vec![],
            omit: vec![],
        };
        for (i, (x, y)) in [(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 5.0)]
            .into_iter()
            .enumerate()
        {
            let n = i + 1;
            submission = submission
                .point(&format!("P-{n}"), &format!("F-{n}"), x, y)
                .proposal(&format!("P-{n}"), true, true, Some(n as i64));
        }
        submission
            .contact("P-1", "3T")
            .contact("P-4", "3T")
    }

    pub fn point(mut self, id: &str, label: &str, x: f64, y: f64) -> Self {
        self.points.push(PointSpec {
            id: id.into(),
            label: label.into(),
            coords: vec![x, y],
            photo: None,
            contact: None,
        });
        self
    }

    pub fn proposal(mut self, id: &str, is_final: bool, is_real: bool, order: Option<i64>) -> Self {
        self.proposals.push((id.into(), is_final, is_real, order));
        self
    }

    pub fn found(mut self, id: &str, number: &str, found: bool, auxiliary: bool) -> Self {
        self.found.push((id.into(), number.into(), found, auxiliary));
        self
    }

    pub fn contact(mut self, id: &str, value: &str) -> Self {
        self.point_mut(id).contact = Some(value.into());
        self
    }

    pub fn photo(mut self, id: &str, file: &str) -> Self {
        self.point_mut(id).photo = Some(file.into());
        self
    }

    pub fn photo_file(mut self, file: &str) -> Self {
        self.photos.push(file.into());
        self
    }

    pub fn move_point(mut self, id: &str, coords: &[f64]) -> Self {
        self.point_mut(id).coords = coords.to_vec();
        self
    }

    pub fn remove_point(mut self, id: &str) -> Self {
        self.points.retain(|p| p.id != id);
        self
    }

    pub fn segment(mut self, id: &str, coords: &[(f64, f64)]) -> Self {
        self.segments.retain(|(sid, _)| sid != id);
        self.segments.push((id.into(), coords.to_vec()));
        self
    }

    pub fn without_field(mut self, field: &str) -> Self {
        self.line_fields.retain(|f| f != field);
        self
    }

    /// Leave an entity file out of the tree.
    pub fn without_entity(mut self, entity: &'static str) -> Self {
        self.omit.push(entity);
        self
    }

    pub fn line_id(&self) -> LineId {
        LineId::new(self.line).unwrap()
    }

    fn point_mut(&mut self, id: &str) -> &mut PointSpec {
        self.points
            .iter_mut()
            .find(|p| p.id == id)
            .unwrap_or_else(|| panic!("no point {id} in fixture"))
    }

    /// Write `<upload>/<line>/DocDelim/...`.
    pub fn write(&self, upload: &Path) {
        let doc = upload.join(self.line.to_string()).join("DocDelim");
        let cartography = doc.join("Cartografia");
        let tables = doc.join("Taules");
        let photos = doc.join("Fotografies");
        for dir in [&cartography, &tables, &photos] {
            fs::create_dir_all(dir).unwrap();
        }

        let segments: Vec<Value> = self
            .segments
            .iter()
            .map(|(id, coords)| {
                json!({
                    "properties": {"ID_LINIA": self.line, "ID": id, "ID_FITA1": format!("{id}01"), "ID_FITA2": format!("{id}02")},
                    "geometry": {"type": "LineString", "coordinates": coords.iter().map(|(x, y)| vec![*x, *y]).collect::<Vec<_>>()},
                })
            })
            .collect();
        let points: Vec<Value> = self
            .points
            .iter()
            .map(|p| {
                json!({
                    "properties": {"ID_PUNT": p.id, "ETIQUETA": p.label, "FOTOS": p.photo, "CONTACTE": p.contact},
                    "geometry": {"type": "Point", "coordinates": p.coords},
                })
            })
            .collect();
        let proposals: Vec<Value> = self
            .proposals
            .iter()
            .map(|(id, pff, esfita, ordpf)| {
                json!({"properties": {"ID_PUNT": id, "PFF": u8::from(*pff), "ESFITA": u8::from(*esfita), "ORDPF": ordpf}})
            })
            .collect();
        let found: Vec<Value> = self
            .found
            .iter()
            .map(|(id, number, found, aux)| {
                json!({"properties": {"ID_PUNT": id, "ID_FITA": number, "TROBADA": u8::from(*found), "AUX": u8::from(*aux)}})
            })
            .collect();

        let entities = [
            ("Lin_TramPpta", cartography.clone(), self.line_fields.clone(), segments),
            ("Punt", cartography, strings(&["ID_PUNT", "ETIQUETA", "FOTOS", "CONTACTE", "geometry"]), points),
            ("P_Proposta", tables.clone(), strings(&["ID_PUNT", "PFF", "ESFITA", "ORDPF"]), proposals),
            ("PUNT_FIT", tables, strings(&["ID_PUNT", "ID_FITA", "TROBADA", "AUX"]), found),
        ];
        for (name, dir, fields, features) in entities {
            if self.omit.contains(&name) {
                continue;
            }
            write_layer(&dir.join(format!("{name}.json")), fields, features);
        }

        for file in &self.photos {
            fs::write(photos.join(file), b"jpeg").unwrap();
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn write_layer(path: &Path, fields: Vec<String>, features: Vec<Value>) {
    let doc = json!({"fields": fields, "features": features});
    fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

// =============================================================================
// Environment
// =============================================================================

/// Upload, work and reference roots in one temporary directory.
pub struct Env {
    _temp: TempDir,
    pub upload: PathBuf,
    pub work: PathBuf,
    pub reference: PathBuf,
}

impl Env {
    /// Empty reference layers.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        let env = Self {
            upload: temp.path().join("upload"),
            work: temp.path().join("work"),
            reference: temp.path().join("reference"),
            _temp: temp,
        };
        fs::create_dir_all(&env.upload).unwrap();
        env.with_reference(vec![], vec![])
    }

    /// Replace the reference layers. Lines are (id_linia, coords),
    /// markers are (id_linia, [x, y]).
    pub fn with_reference(self, lines: Vec<(i64, Vec<(f64, f64)>)>, markers: Vec<(i64, [f64; 2])>) -> Self {
        fs::create_dir_all(&self.reference).unwrap();
        let lines: Vec<Value> = lines
            .into_iter()
            .map(|(id, coords)| {
                json!({
                    "properties": {"id_linia": id},
                    "geometry": {"type": "LineString", "coordinates": coords.iter().map(|(x, y)| vec![*x, *y]).collect::<Vec<_>>()},
                })
            })
            .collect();
        let markers: Vec<Value> = markers
            .into_iter()
            .map(|(id, xy)| {
                json!({
                    "properties": {"id_linia": id},
                    "geometry": {"type": "Point", "coordinates": xy},
                })
            })
            .collect();
        write_layer(
            &self.reference.join("tram_linia_mem.json"),
            strings(&["id_linia", "geometry"]),
            lines,
        );
        write_layer(
            &self.reference.join("fita_mem.json"),
            strings(&["id_linia", "geometry"]),
            markers,
        );
        self
    }

    pub fn submit(&self, submission: &Submission) {
        submission.write(&self.upload);
    }

    /// Run the pipeline over the on-disk collaborators.
    pub fn check(&self, line: LineId) -> RunResult {
        let ingest = DirectoryIngest::new(&self.upload, &self.work);
        let reference = JsonReferenceStore::new(&self.reference);
        Pipeline::new(&ingest, &reference).run(line)
    }
}

pub fn errors(result: &RunResult) -> Vec<&str> {
    result
        .entries
        .iter()
        .filter(|e| e.level.is_error())
        .map(|e| e.message.as_str())
        .collect()
}
