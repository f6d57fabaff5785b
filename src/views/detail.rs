use std::path::{Path, PathBuf};

use crate::data::filter::ElementSource;
use crate::data::model::{Element, Field, Value};
use crate::error::LookupError;

/// Field definitions shown under every detail card.
pub const GLOSSARY: [(&str, &str); 13] = [
    ("Atomic Number", "The number of protons in the nucleus of an atom; it determines the element."),
    ("Atomic Mass", "The weighted average mass of the atoms of an element."),
    ("Group", "The column of the periodic table; elements in a group share valence structure."),
    ("Period", "The row of the periodic table, equal to the number of occupied electron shells."),
    ("Type", "The chemical family the element belongs to."),
    ("Radioactive", "Whether every isotope of the element is unstable."),
    ("Density", "The mass per unit volume of a substance."),
    ("Boiling Point", "The temperature at which a substance changes from liquid to gas."),
    ("Melting Point", "The temperature at which a solid turns into a liquid."),
    ("Ionization Energy", "The energy required to remove an electron from an atom."),
    ("Electron Affinity", "The energy released when an electron is added to a neutral atom."),
    ("Number of Shells", "The number of electron energy levels in an atom."),
    ("Valence Electrons", "Electrons in the outermost shell, which take part in chemical bonding."),
];

/// Background reading shown under the periodic table: `(title, paragraphs)`.
pub const ABOUT_SECTIONS: [(&str, &[&str]); 5] = [
    (
        "History of the Periodic Table",
        &[
            "Dmitri Mendeleev published the first periodic table in 1869, ordering the elements by atomic mass and leaving gaps for elements not yet found.",
            "1669: Hennig Brand isolates phosphorus.",
            "1789: Antoine Lavoisier lists the known elements and separates metals from non-metals.",
            "1869: Mendeleev's table predicts missing elements; his eka-aluminium turns out to be gallium.",
            "1913: Henry Moseley reorders the table by atomic number instead of atomic mass.",
            "1940s onward: synthetic elements such as plutonium and seaborgium extend the table.",
        ],
    ),
    (
        "Basic Information",
        &[
            "Elements are ordered by atomic number, the count of protons in the nucleus.",
            "Groups are the 18 columns; members of a group tend to behave alike (alkali metals in group 1, halogens in 17, noble gases in 18).",
            "Periods are the 7 rows; crossing a period moves from metals towards nonmetals.",
            "Blocks: s (groups 1 and 2 plus helium), p (groups 13 to 18), d (the transition metals) and f (lanthanides and actinides, drawn apart below the grid).",
            "Atomic radius shrinks across a period and grows down a group. Ionization energy and electronegativity do the opposite.",
        ],
    ),
    (
        "Fun Facts",
        &[
            "Oganesson, the heaviest known element, exists only for moments inside a laboratory.",
            "Gold and platinum are unreactive enough to be found pure in nature.",
            "Carbon forms the backbone of organic chemistry and of all known life.",
            "Helium fills party balloons and cools the superconducting magnets of MRI scanners.",
            "Tom Lehrer set the names of the elements to the Major-General's Song from The Pirates of Penzance.",
        ],
    ),
    (
        "Modern Chemistry",
        &[
            "Every element beyond uranium (92) is made artificially, in reactors or particle accelerators.",
            "Isotopes differ only in neutron count; carbon-14 dates fossils and artefacts.",
            "Physicists are searching for an island of stability among the superheavy elements.",
            "IUPAC approves new names, which often honour scientists or places, as with einsteinium and moscovium.",
        ],
    ),
    (
        "In Everyday Life",
        &[
            "Medicine: iodine and technetium are used in imaging and treatment.",
            "Technology: silicon underpins semiconductors and lithium powers rechargeable batteries.",
            "Environment: argon fills insulating windows and oxygen drives life and industry.",
            "Health: trace zinc and iron support enzymes and oxygen transport.",
        ],
    ),
];

/// One labelled field of the detail card.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub field: Field,
    pub label: &'static str,
    pub value: Value,
    pub unit: Option<&'static str>,
}

impl Fact {
    /// Value with its unit, or `"N/A"` when absent.
    pub fn display(&self) -> String {
        match (&self.value, self.unit) {
            (Value::Absent, _) => "N/A".to_string(),
            (v, Some(unit)) => format!("{v} {unit}"),
            (v, None) => v.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementDetail<'a> {
    pub element: &'a Element,
    /// Every fixed field, in schema order, absences kept.
    pub facts: Vec<Fact>,
    pub glossary: &'static [(&'static str, &'static str)],
}

impl ElementDetail<'_> {
    pub fn title(&self) -> String {
        format!("{} ({})", self.element.name, self.element.symbol)
    }

    /// Image for this element under `assets_dir`, if the file exists.
    pub fn image_in(&self, assets_dir: &Path) -> Option<PathBuf> {
        let path = image_path(assets_dir, self.element.atomic_number);
        path.is_file().then_some(path)
    }
}

/// `<assets_dir>/<atomic_number>.png`
pub fn image_path(assets_dir: &Path, atomic_number: u32) -> PathBuf {
    assets_dir.join(format!("{atomic_number}.png"))
}

/// Look up one element by atomic number and lay out its card.
pub fn detail<S>(source: &S, atomic_number: u32) -> Result<ElementDetail<'_>, LookupError>
where
    S: ElementSource + ?Sized,
{
    let element = source
        .find(atomic_number)
        .ok_or(LookupError::NotFound(atomic_number))?;

    let facts = Field::ALL
        .into_iter()
        .map(|field| Fact {
            field,
            label: field.label(),
            value: element.value(field),
            unit: match field {
                Field::Property(p) => p.unit(),
                _ => None,
            },
        })
        .collect();

    Ok(ElementDetail {
        element,
        facts,
        glossary: &GLOSSARY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterCriteria, FilteredView};
    use crate::data::model::Property;
    use crate::views::fixtures::sample;

    #[test]
    fn test_detail_lists_every_field() {
        let ds = sample();
        let card = detail(&ds, 2).unwrap();
        assert_eq!(card.title(), "Helium (He)");
        assert_eq!(card.facts.len(), Field::ALL.len());

        let fact = |f: Field| card.facts.iter().find(|x| x.field == f).unwrap();
        assert_eq!(fact(Field::Group).value, Value::Integer(18));
        assert_eq!(fact(Field::Property(Property::MeltingPoint)).value, Value::Absent);
        assert_eq!(fact(Field::Property(Property::MeltingPoint)).display(), "N/A");
        assert_eq!(fact(Field::Property(Property::BoilingPoint)).display(), "4.22 K");
        assert_eq!(card.glossary.len(), GLOSSARY.len());
    }

    #[test]
    fn test_about_sections_are_filled() {
        assert_eq!(ABOUT_SECTIONS[0].0, "History of the Periodic Table");
        for (title, paragraphs) in ABOUT_SECTIONS {
            assert!(!title.is_empty());
            assert!(!paragraphs.is_empty());
            assert!(paragraphs.iter().all(|p| !p.trim().is_empty()));
        }
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let ds = sample();
        assert_eq!(detail(&ds, 200).unwrap_err(), LookupError::NotFound(200));

        let view = apply(&ds, &FilterCriteria::default().with_periods([1]));
        assert!(detail(&view, 2).is_ok());
        assert_eq!(detail(&view, 3).unwrap_err(), LookupError::NotFound(3));
        assert!(detail(&FilteredView::all(&ds), 3).is_ok());
    }

    #[test]
    fn test_image_lookup_tolerates_missing_files() {
        let ds = sample();
        let dir = tempfile::tempdir().unwrap();
        let card = detail(&ds, 1).unwrap();
        assert_eq!(card.image_in(dir.path()), None);

        std::fs::write(dir.path().join("1.png"), b"png").unwrap();
        assert_eq!(card.image_in(dir.path()), Some(dir.path().join("1.png")));
    }
}
