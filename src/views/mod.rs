/// View derivers: pure functions from a filtered view (plus per-view
/// selections) to a renderer-ready payload.
///
/// ```text
///                       FilteredView
///                            │
///    ┌───────┬───────┬───────┼───────┬───────┐
///    ▼       ▼       ▼       ▼       ▼       ▼
///  grid    table   trend  scatter  radar  detail
///    │       │       │       │       │       │
///    ▼       ▼       ▼       ▼       ▼       ▼
/// GridLayout TableView TrendView ScatterView RadarView ElementDetail
/// ```
///
/// Nothing here holds state between calls; every payload is rebuilt from
/// scratch on each interaction. "Nothing to show" outcomes are payload
/// variants, not errors.

pub mod detail;
pub mod grid;
pub mod radar;
pub mod scatter;
pub mod table;
pub mod trend;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::data::loader::load_csv_reader;
    use crate::data::model::Dataset;

    /// A ten-row slice of the bundled table, with its gaps left in place.
    pub const SAMPLE_CSV: &str = "\
AtomicNumber,Element,Symbol,AtomicMass,Period,Group,Phase,Radioactive,Metal,Nonmetal,Metalloid,Type,Electronegativity,IonizationEnergy,ElectronAffinity,Density,MeltingPoint,BoilingPoint,NumberofShells,NumberofValence
1,Hydrogen,H,1.007,1,1,gas,no,,yes,,Nonmetal,2.2,13.5984,0.754,0.0000899,14.175,20.28,1,1
2,Helium,He,4.002,1,18,gas,no,,yes,,Noble Gas,,24.5874,,0.000179,,4.22,1,2
3,Lithium,Li,6.941,2,1,solid,no,yes,,,Alkali Metal,0.98,5.3917,0.618,0.534,453.85,1615,2,1
6,Carbon,C,12.011,2,14,solid,no,,yes,,Nonmetal,2.55,11.2603,1.262,2.267,3948.15,4300,2,4
26,Iron,Fe,55.845,4,8,solid,no,yes,,,Transition Metal,1.83,7.9024,0.151,7.874,1808.15,3134,4,
43,Technetium,Tc,98,5,7,solid,yes,yes,,,Transition Metal,1.9,7.28,0.55,11.5,2473.15,5150,5,
57,Lanthanum,La,138.905,6,3,solid,no,yes,,,Lanthanide,1.1,5.5769,0.47,6.145,1193.15,3737,6,
58,Cerium,Ce,140.116,6,,solid,no,yes,,,Lanthanide,1.12,5.5387,0.5,6.77,1071.15,3716,6,
89,Actinium,Ac,227,7,3,solid,yes,yes,,,Actinide,1.1,5.17,,10.07,1323.15,3471,7,
92,Uranium,U,238.029,7,,solid,yes,yes,,,Actinide,1.38,6.1941,,18.95,1405.15,4404,7,
";

    pub fn sample() -> Dataset {
        load_csv_reader(SAMPLE_CSV.as_bytes()).unwrap()
    }
}
