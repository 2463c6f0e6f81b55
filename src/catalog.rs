use crate::model::{Category, Field, Project, ProjectId};

/// The research projects on offer. Seed data, never modified at runtime.
pub static CATALOG: &[Project] = &[
    Project {
        id: ProjectId(1),
        title: "AI for Tea Plantations",
        field: Field::It,
        researcher: "Dr. S. Perera",
        description: "Developing machine learning models to detect disease in tea leaves using drone imagery. Looking for students with Python and Computer Vision skills.",
        requirements: &[
            "Python (PyTorch/TensorFlow)",
            "Basic Computer Vision",
            "Drone piloting (bonus)",
        ],
    },
    Project {
        id: ProjectId(2),
        title: "Marine Biology Survey",
        field: Field::Biology,
        researcher: "Prof. K. Silva",
        description: "Comprehensive survey of coral reef health off the coast of Mirissa. Requires diving certification and data collection skills.",
        requirements: &["PADI Open Water Certification", "Data Logging", "Swimming"],
    },
    Project {
        id: ProjectId(3),
        title: "Sustainable Concrete Mixes",
        field: Field::Engineering,
        researcher: "Dr. M. Fernando",
        description: "Testing new eco-friendly concrete formulations using rice husk ash. Lab processing and strength testing roles available.",
        requirements: &["Civil Engineering bg", "Lab Safety Protocols", "Material Testing"],
    },
    Project {
        id: ProjectId(4),
        title: "Rural Education Impact",
        field: Field::SocialScience,
        researcher: "Dr. A. Jayasuriya",
        description: "Analyzing the impact of digital literacy programs in rural schools. Survey design and statistical analysis support needed.",
        requirements: &["SPSS/R", "Survey Design", "Willingness to travel"],
    },
    Project {
        id: ProjectId(5),
        title: "Smart Irrigation System",
        field: Field::Agriculture,
        researcher: "Eng. D. Bandara",
        description: "IoT-based irrigation control for paddy fields. Arduino programming and sensor integration skills required.",
        requirements: &["Arduino/C++", "Circuit Design", "IoT Protocols"],
    },
    Project {
        id: ProjectId(6),
        title: "Historical Archives Digitization",
        field: Field::SocialScience,
        researcher: "Prof. L. Gunawardena",
        description: "Digitizing and cataloging colonial-era manuscripts using OCR technology and metadata tagging.",
        requirements: &["History/Archival Studies", "Detail Oriented", "OCR Tools"],
    },
];

pub fn find(id: ProjectId) -> Option<&'static Project> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Projects matching both the category and the search term, in catalog
/// order. An empty term matches everything.
pub fn filter(term: &str, category: Category) -> Vec<&'static Project> {
    filter_projects(CATALOG, term, category)
}

pub fn filter_projects<'a>(projects: &'a [Project], term: &str, category: Category) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| category.accepts(p.field) && p.mentions(term))
        .collect()
}
