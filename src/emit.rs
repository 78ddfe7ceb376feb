//! Turning blobs into files.
//!
//! Every named blob becomes its own file in the output directory, and the
//! input file is rewritten there as an aggregator that `#include`s those files
//! in their original order. Output names are unique across a whole run.

use crate::chunk::chunk;
use crate::error::{Result, SplitError};
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Output names handed out so far in one run.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `base`, or `base_1`, `base_2`, ... if it is taken.
    pub fn claim(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut idx = 0;
        while self.used.contains(&name) {
            idx += 1;
            name = format!("{base}_{idx}");
        }
        self.used.insert(name.clone());
        name
    }
}

/// Everything one input file turns into, before anything is written.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitPlan {
    /// (output name, contents) per extracted definition, in source order.
    pub definitions: Vec<(String, String)>,
    pub aggregator_name: String,
    pub aggregator: String,
}

/// Plan the split of `source`; `aggregator_base` is the input's file name.
pub fn plan(source: &str, aggregator_base: &str, names: &mut NameRegistry) -> SplitPlan {
    let mut plan = SplitPlan::default();

    for blob in chunk(source) {
        match blob.name {
            Some(name) => {
                let out_name = names.claim(name);
                plan.aggregator.push_str(&format!("#include \"{out_name}\"\n"));
                plan.definitions.push((out_name, blob.text()));
            }
            None => plan.aggregator.push_str(&blob.text()),
        }
    }

    plan.aggregator_name = names.claim(aggregator_base);
    plan
}

/// What was written for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub aggregator: PathBuf,
    pub definitions: Vec<PathBuf>,
}

/// What was written for a whole run, one entry per input in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn definition_count(&self) -> usize {
        self.files.iter().map(|f| f.definitions.len()).sum()
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| SplitError::output(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Split one input file into `out_dir`, which must already exist.
pub fn split_file(input: &Path, out_dir: &Path, names: &mut NameRegistry) -> Result<FileReport> {
    info!("Splitting {}", input.display());

    let source = fs::read_to_string(input).map_err(|e| SplitError::input(input, e))?;
    let base = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let plan = plan(&source, &base, names);

    let mut definitions = Vec::with_capacity(plan.definitions.len());
    for (name, contents) in &plan.definitions {
        let path = out_dir.join(name);
        write_output(&path, contents)?;
        definitions.push(path);
    }

    let aggregator = out_dir.join(&plan.aggregator_name);
    write_output(&aggregator, &plan.aggregator)?;

    Ok(FileReport {
        input: input.to_path_buf(),
        aggregator,
        definitions,
    })
}

/// Split every input in order into `out_dir`, creating it if needed.
///
/// Output names are unique across all inputs. The first failure stops the
/// run and leaves already written files in place.
pub fn split_files<P: AsRef<Path>>(inputs: &[P], out_dir: &Path) -> Result<RunReport> {
    fs::create_dir_all(out_dir).map_err(|e| SplitError::output(out_dir, e))?;

    let mut names = NameRegistry::new();
    let mut report = RunReport::default();
    for input in inputs {
        report
            .files
            .push(split_file(input.as_ref(), out_dir, &mut names)?);
    }
    Ok(report)
}
