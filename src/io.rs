//! Edge-list input and delimited-table output.

use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::network::Network;

/// Parses a whitespace-delimited edge list.
///
/// The first two numeric fields of every row name one undirected edge;
/// further fields are ignored. External identifiers are remapped to dense
/// indices in order of first appearance and duplicate edges are absorbed.
/// Blank lines and `#` comments are skipped; anything else malformed is an
/// explicit error, never defaulted.
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<Vec<BTreeSet<usize>>, Box<dyn Error>> {
    let mut ids: HashMap<u64, usize> = HashMap::new();
    let mut links: Vec<BTreeSet<usize>> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let row = line.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        let mut fields = row.split_whitespace();
        let (raw_i, raw_j) = match (fields.next(), fields.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(
                    format!("line {}: expected two fields, got {row:?}", line_no + 1).into(),
                )
            }
        };
        let id_i: u64 = raw_i
            .parse()
            .map_err(|_| format!("line {}: invalid node id {raw_i:?}", line_no + 1))?;
        let id_j: u64 = raw_j
            .parse()
            .map_err(|_| format!("line {}: invalid node id {raw_j:?}", line_no + 1))?;
        let i = intern(&mut ids, &mut links, id_i);
        let j = intern(&mut ids, &mut links, id_j);
        if i == j {
            return Err(format!("line {}: self-link on node {id_i}", line_no + 1).into());
        }
        links[i].insert(j);
        links[j].insert(i);
    }
    Ok(links)
}

fn intern(ids: &mut HashMap<u64, usize>, links: &mut Vec<BTreeSet<usize>>, id: u64) -> usize {
    *ids.entry(id).or_insert_with(|| {
        links.push(BTreeSet::new());
        links.len() - 1
    })
}

/// Loads a network from an edge-list file. The triangle caches are
/// initialized by the adjacency constructor's one-time recount.
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<Network, Box<dyn Error>> {
    let file = File::open(path.as_ref())
        .map_err(|e| format!("cannot open {}: {e}", path.as_ref().display()))?;
    let links = parse_edge_list(BufReader::new(file))?;
    Ok(Network::from_adjacency(links))
}

/// Writes rows of numeric fields as comma-delimited text.
pub fn write_table<P: AsRef<Path>>(path: P, rows: &[Vec<f64>]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::WriterBuilder::new().from_path(path.as_ref())?;
    for row in rows {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Exports a network as an edge list, one `i,j` row per undirected edge.
pub fn write_edge_list<P: AsRef<Path>>(path: P, network: &Network) -> Result<(), Box<dyn Error>> {
    let rows: Vec<Vec<f64>> = network
        .edges()
        .map(|(i, j)| vec![i as f64, j as f64])
        .collect();
    write_table(path, &rows)
}
