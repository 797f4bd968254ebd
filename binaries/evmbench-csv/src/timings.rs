/// Benchmark timing data.
///
/// - Key = benchmark name
/// - Value = benchmark time in milliseconds
///
/// Iteration follows first insertion. Inserting a name that
/// already exists overwrites its time but keeps its position.
pub type Timings = indexmap::IndexMap<String, f64>;
