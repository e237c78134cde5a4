//! Static catalog of department booking forms.
//!
//! Every department page shares the contact block, a doctor select and the
//! preferred appointment time; pages differ in their provider list and in
//! one or two extra fields (notes, address, procedure, age group). The
//! hospital-wide `general` page has no doctor or time: the patient picks a
//! specialty and then one of its departments.

use booking_core::{CoreError, FormSpec, FormSpecBuilder};
use booking_domain::{
    ids, Department, FieldDescriptor, FieldKind, ProviderOption, SelectOption, SpecialtyType,
};
use once_cell::sync::Lazy;

type Provider = (&'static str, &'static str, Option<&'static str>);
type Choice = (&'static str, &'static str);

/// Page-specific additions on top of the shared fields.
#[derive(Clone, Copy)]
enum Extra {
    /// Free-text notes stored under `healthConcerns`, not required.
    Notes(&'static str),
    Address,
    /// Select stored under `procedureType`.
    Procedure(&'static str, &'static [Choice]),
    /// Select stored under `age`.
    AgeGroup(&'static str, &'static [Choice]),
    /// Free-text age stored under `age`.
    AgeText(&'static str),
    /// Yes/No select stored under `isFirstVisit`.
    FirstVisit,
    /// `specialtyType` select followed by a `medicalDepartment` select
    /// whose options depend on the chosen specialty.
    DepartmentPicker {
        medical: &'static [Choice],
        surgical: &'static [Choice],
    },
}

struct Entry {
    slug: &'static str,
    name: &'static str,
    specialty: SpecialtyType,
    doctor_label: Option<&'static str>,
    /// Adds the doctor select and appointment time.
    scheduled: bool,
    extras: &'static [Extra],
    providers: &'static [Provider],
}

const fn medical(
    slug: &'static str,
    name: &'static str,
    extras: &'static [Extra],
    providers: &'static [Provider],
) -> Entry {
    Entry {
        slug,
        name,
        specialty: SpecialtyType::Medical,
        doctor_label: None,
        scheduled: true,
        extras,
        providers,
    }
}

const fn surgical(
    slug: &'static str,
    name: &'static str,
    extras: &'static [Extra],
    providers: &'static [Provider],
) -> Entry {
    Entry {
        slug,
        name,
        specialty: SpecialtyType::Surgical,
        doctor_label: None,
        scheduled: true,
        extras,
        providers,
    }
}

const BARIATRIC_PROCEDURES: &[Choice] = &[
    ("gastric-bypass", "Gastric Bypass"),
    ("sleeve", "Sleeve Gastrectomy"),
    ("balloon", "Intragastric Balloon"),
    ("esg", "Endoscopic Sleeve Gastroplasty"),
    ("medical", "Medical Management"),
];

const NEURO_PROCEDURES: &[Choice] = &[
    ("tumor", "Brain Tumor"),
    ("spine", "Spine Surgery"),
    ("stroke", "Stroke Treatment"),
    ("pediatric", "Pediatric Neurosurgery"),
    ("other", "Other"),
];

const BREAST_PROCEDURES: &[Choice] = &[
    ("lump", "Lump Removal"),
    ("mastectomy", "Mastectomy"),
    ("reconstruction", "Reconstruction"),
    ("biopsy", "Biopsy"),
    ("other", "Other"),
];

const LAPAROSCOPIC_PROCEDURES: &[Choice] = &[
    ("cholecystectomy", "Cholecystectomy"),
    ("appendectomy", "Appendectomy"),
    ("hernia", "Hernia Repair"),
    ("colorectal", "Colorectal Surgery"),
    ("other", "Other"),
];

const HEPATOBILIARY_PROCEDURES: &[Choice] = &[
    ("liver", "Liver Surgery"),
    ("biliary", "Biliary Surgery"),
    ("pancreas", "Pancreatic Surgery"),
    ("gallbladder", "Gallbladder Removal"),
    ("other", "Other"),
];

const OBSTETRICS_PROCEDURES: &[Choice] = &[
    ("pregnancy", "Pregnancy"),
    ("infertility", "Infertility"),
    ("menstrual", "Menstrual Issues"),
    ("general", "General Checkup"),
];

const PLASTIC_PROCEDURES: &[Choice] = &[
    ("reconstructive", "Reconstructive Surgery"),
    ("aesthetic", "Aesthetic Surgery"),
    ("burn", "Burn Reconstruction"),
    ("gender", "Gender-Affirming"),
    ("other", "Other"),
];

const UROLOGY_CONCERNS: &[Choice] = &[
    ("kidney-stones", "Kidney Stones"),
    ("prostate-issues", "Prostate Issues"),
    ("urinary-incontinence", "Urinary Incontinence"),
    ("uti", "Recurrent UTIs"),
    ("male-infertility", "Male Infertility"),
    ("other", "Other Urological Concern"),
];

const ENT_PROCEDURES: &[Choice] = &[
    ("tonsillectomy", "Tonsillectomy"),
    ("sinus", "Sinus Surgery"),
    ("ear", "Ear Surgery"),
    ("voice", "Vocal Cord Surgery"),
    ("other", "Other"),
];

const CARDIAC_PROCEDURES: &[Choice] = &[
    ("cabg", "CABG (Bypass Surgery)"),
    ("valve", "Valve Repair/Replacement"),
    ("aneurysm", "Aneurysm Repair"),
    ("minimally-invasive", "Minimally Invasive"),
    ("device", "Pacemaker/ICD Implant"),
];

const ORAL_PROCEDURES: &[Choice] = &[
    ("implants", "Dental Implants"),
    ("wisdom-teeth", "Wisdom Teeth"),
    ("jaw-surgery", "Jaw Surgery"),
    ("facial-trauma", "Facial Trauma"),
    ("other", "Other Procedure"),
];

const EYE_CONCERNS: &[Choice] = &[
    ("vision-check", "Routine vision check"),
    ("squint", "Squint/Crossed eyes"),
    ("lazy-eye", "Lazy eye treatment"),
    ("glasses", "Glasses prescription"),
    ("other", "Other eye problem"),
];

const AGE_GROUPS: &[Choice] = &[
    ("child", "Child (Under 12)"),
    ("teen", "Teenager (13-19)"),
    ("adult", "Adult (20+)"),
];

const FIRST_VISIT: &[Choice] = &[("yes", "Yes"), ("no", "No")];

const SPECIALTIES: &[Choice] = &[
    ("medical", "Medical Specialties"),
    ("surgical", "Surgical Specialties"),
];

const MEDICAL_DEPARTMENTS: &[Choice] = &[
    ("rheumatology", "Rheumatology Clinic"),
    ("psychology", "Psychology Clinic"),
    ("nutrition", "Nutrition Clinic"),
    ("pulmonology", "Pulmonology Clinic"),
    ("family-medicine", "Family Medicine Clinic"),
    ("psychiatry", "Psychiatry Clinic"),
    ("physiotherapy", "Physiotherapy Clinic"),
    ("paediatrics-neonatology", "Paediatrics & Neonatology"),
    ("neurology", "Neurology Clinic"),
    ("nephrology", "Nephrology Clinic"),
    ("oncology", "Medical Oncology Clinic"),
    ("internal-medicine", "Internal Medicine Clinic"),
    ("gastroenterology", "Gastroenterology Clinic"),
    ("dermatology", "Dermatology Clinic"),
    ("haematology", "Haematology Clinic"),
    ("cardiology", "Cardiology Clinic"),
    ("anaesthesiology", "Anaesthesiology & Pain Medicine Clinic"),
];

const SURGICAL_DEPARTMENTS: &[Choice] = &[
    ("orthodontics", "Orthodontics"),
    ("urology", "Urology"),
    ("surgical-oncology", "Surgical Oncology"),
    ("plastic-surgery", "Plastic & Reconstructive Surgery"),
    ("obstetrics-gynaecology", "Obstetrics & Gynaecology"),
    ("oral-maxillofacial-surgery", "Oral & Maxillofacial Surgery"),
    ("paediatric-ophthalmology", "Paediatric Ophthalmology"),
    ("paediatrics-neonatology", "Paediatrics & Neonatology"),
    ("neurology", "Neurology Clinic"),
    (
        "general-laparoscopic-surgery",
        "General, Laparoscopic & Urological Surgery",
    ),
    ("ent", "ENT"),
    ("cardiac-surgery", "Cardiac Surgery"),
    ("breast-surgery", "Breast Surgery"),
    ("bariatric-surgery", "Bariatric Surgery"),
];

const ENTRIES: &[Entry] = &[
    Entry {
        slug: "general",
        name: "Evercare Hospital",
        specialty: SpecialtyType::General,
        doctor_label: None,
        scheduled: false,
        extras: &[
            Extra::FirstVisit,
            Extra::Address,
            Extra::DepartmentPicker {
                medical: MEDICAL_DEPARTMENTS,
                surgical: SURGICAL_DEPARTMENTS,
            },
        ],
        providers: &[],
    },
    medical(
        "cardiology",
        "Cardiology Clinic",
        &[Extra::Notes("Health Concerns")],
        &[
            ("dr-sanjay", "Dr. Sanjay Gupta", Some("Interventional Cardiology")),
            ("dr-priya", "Dr. Priya Sharma", Some("Electrophysiology")),
            ("dr-rahul", "Dr. Rahul Mehta", Some("Heart Failure Specialist")),
        ],
    ),
    medical(
        "dermatology",
        "Dermatology Clinic",
        &[Extra::Notes("Health Concerns")],
        &[
            ("dr-nisha", "Dr. Nisha Kapoor", Some("Medical & Cosmetic")),
            ("dr-arjun", "Dr. Arjun Patel", Some("Skin Cancer Specialist")),
            ("dr-preeti", "Dr. Preeti Verma", Some("Pediatric Dermatology")),
        ],
    ),
    medical(
        "haematology",
        "Haematology Clinic",
        &[Extra::Notes("Health Concerns")],
        &[
            ("dr-vikram", "Dr. Vikram Malhotra", Some("Blood Cancers")),
            ("dr-anjali", "Dr. Anjali Deshpande", Some("Bleeding/Clotting")),
            ("dr-rajat", "Dr. Rajat Sharma", Some("Paediatric Haematology")),
        ],
    ),
    medical(
        "gastroenterology",
        "Gastroenterology Clinic",
        &[Extra::Notes("Health Concerns")],
        &[("dr-ayesha", "Dr. Ayesha Siddiqui", None)],
    ),
    medical(
        "anaesthesiology",
        "Anaesthesiology & Pain Medicine Clinic",
        &[Extra::Notes("Health Concerns")],
        &[
            ("dr-neha", "Dr. Neha Kapoor", Some("Pain Management")),
            ("dr-arvind", "Dr. Arvind Singh", Some("Cardiac Anaesthesia")),
            ("dr-priya", "Dr. Priya Reddy", Some("Paediatric Anaesthesia")),
        ],
    ),
    medical(
        "oncology",
        "Oncology Clinic",
        &[Extra::Notes("Health Goals")],
        &[("dr-sara", "Dr. Sara Iqbal", None)],
    ),
    medical(
        "nephrology",
        "Nephrology Clinic",
        &[Extra::Notes("Health Goals")],
        &[
            ("nida-ahsan", "Dr. Nida Ahsan", None),
            ("hassan-ali", "Dr. Hassan Ali", None),
        ],
    ),
    medical(
        "psychiatry",
        "Psychiatry Clinic",
        &[Extra::Notes("Concerns")],
        &[
            ("dr-fatima", "Dr. Fatima Ali", None),
            ("dr-ahmed", "Dr. Ahmed Saeed", None),
        ],
    ),
    medical(
        "pulmonology",
        "Pulmonology Clinic",
        &[Extra::Notes("Symptoms")],
        &[("dr-salman-ahmad", "Dr. Salman Ahmad", None)],
    ),
    medical(
        "family-medicine",
        "Family Medicine Clinic",
        &[Extra::Notes("Concern")],
        &[("dr-ahmed", "Dr. Ahmed Ali", None)],
    ),
    medical(
        "physiotherapy",
        "Physiotherapy Clinic",
        &[Extra::Notes("Condition")],
        &[
            ("dr-fahad", "Dr. Fahad Rauf", None),
            ("dr-saba", "Dr. Saba Nasir", None),
        ],
    ),
    medical(
        "rheumatology",
        "Rheumatology Clinic",
        &[Extra::Address],
        &[("dr-hamdani", "Dr. Muhammad Afzal Hamdani", None)],
    ),
    medical(
        "paediatrics-neonatology",
        "Paediatrics & Neonatology",
        &[Extra::Notes("Health Goals")],
        &[("dr-sadia", "Dr. Sadia Ali", None)],
    ),
    Entry {
        doctor_label: Some("Select Orthodontist"),
        ..medical(
            "orthodontics",
            "Orthodontics",
            &[Extra::Address, Extra::AgeGroup("Age Group", AGE_GROUPS)],
            &[
                ("dr-johnson", "Dr. Sarah Johnson", None),
                ("dr-chen", "Dr. Michael Chen", None),
                ("dr-rahman", "Dr. Aisha Rahman", None),
            ],
        )
    },
    medical(
        "paediatric-ophthalmology",
        "Paediatric Ophthalmology",
        &[
            Extra::AgeText("Child's Age"),
            Extra::Procedure("Eye Concern", EYE_CONCERNS),
        ],
        &[
            ("dr-ahmed", "Dr. Sarah Ahmed", None),
            ("dr-khan", "Dr. Imran Khan", None),
            ("dr-malik", "Dr. Fatima Malik", None),
        ],
    ),
    surgical(
        "bariatric-surgery",
        "Bariatric Surgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", BARIATRIC_PROCEDURES),
        ],
        &[
            ("dr-usman", "Dr. Usman Rafiq", None),
            ("dr-hira", "Dr. Hira Siddiqui", None),
            ("dr-kamran", "Dr. M. Kamran Aziz", None),
        ],
    ),
    surgical(
        "neurosurgery",
        "Neurosurgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", NEURO_PROCEDURES),
        ],
        &[
            ("dr-syed", "Dr. Ahmed Syed", None),
            ("dr-khan", "Dr. Sana Khan", None),
        ],
    ),
    surgical(
        "breast-surgery",
        "Breast Surgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", BREAST_PROCEDURES),
        ],
        &[
            ("dr-nadia", "Dr. Nadia Hasan", None),
            ("dr-adeel", "Dr. Adeel Qureshi", None),
            ("dr-mahnoor", "Dr. Mahnoor Bukhari", None),
        ],
    ),
    surgical(
        "general-laparoscopic-surgery",
        "General & Laparoscopic Surgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", LAPAROSCOPIC_PROCEDURES),
        ],
        &[
            ("dr-ayesha", "Dr. Ayesha Kamal", None),
            ("dr-omar", "Dr. Omar Zubair", None),
            ("dr-sara", "Dr. Sara Nadeem", None),
        ],
    ),
    surgical(
        "hepatobiliary-surgery",
        "Hepatobiliary Surgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", HEPATOBILIARY_PROCEDURES),
        ],
        &[
            ("dr-hasan", "Dr. Adeel Hasan", None),
            ("dr-rao", "Dr. Mahnoor Rao", None),
        ],
    ),
    surgical(
        "obstetrics-gynaecology",
        "Obstetrics & Gynaecology",
        &[
            Extra::Address,
            Extra::Procedure("Reason for Visit", OBSTETRICS_PROCEDURES),
        ],
        &[
            ("dr-saeed", "Dr. Amina Saeed", None),
            ("dr-farooq", "Dr. Rabia Farooq", None),
        ],
    ),
    surgical(
        "plastic-surgery",
        "Plastic & Reconstructive Surgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", PLASTIC_PROCEDURES),
        ],
        &[
            ("dr-miller", "Dr. Sophia Miller", None),
            ("dr-chang", "Dr. Jonathan Chang", None),
            ("dr-alvarez", "Dr. Maria Alvarez", None),
        ],
    ),
    surgical(
        "urology",
        "Urology",
        &[Extra::Address, Extra::Procedure("Concern", UROLOGY_CONCERNS)],
        &[
            ("dr-langdon", "Dr. Robert Langdon", Some("Kidney Stones")),
            ("dr-siddiqui", "Dr. Ayesha Siddiqui", Some("Female Urology")),
            ("dr-wilson", "Dr. James Wilson", Some("Uro-Oncology")),
        ],
    ),
    surgical(
        "ent",
        "ENT Surgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", ENT_PROCEDURES),
        ],
        &[
            ("dr-khan", "Dr. Ayesha Khan", None),
            ("dr-hassan", "Dr. Faisal Hassan", None),
        ],
    ),
    surgical(
        "cardiac-surgery",
        "Cardiac Surgery",
        &[
            Extra::Address,
            Extra::Procedure("Procedure Type", CARDIAC_PROCEDURES),
        ],
        &[
            ("dr-rehan", "Dr. Rehan Qureshi", None),
            ("dr-mehwish", "Dr. Mehwish Tariq", None),
            ("dr-imran", "Dr. Imran Khalid", None),
        ],
    ),
    surgical(
        "oral-maxillofacial-surgery",
        "Oral & Maxillofacial Surgery",
        &[
            Extra::Notes("Concerns"),
            Extra::Procedure("Procedure Type", ORAL_PROCEDURES),
        ],
        &[
            ("dr-khan", "Dr. Noor Fatima", None),
            ("dr-mahmood", "Dr. Mariam Malik", None),
            ("dr-ali", "Dr. Shumaila Zai", None),
        ],
    ),
    surgical(
        "surgical-oncology",
        "Surgical Oncology",
        &[Extra::Address],
        &[
            ("dr-langdon", "Dr. Robert Langdon", None),
            ("dr-wong", "Dr. Elizabeth Wong", None),
            ("dr-rodriguez", "Dr. Michael Rodriguez", None),
        ],
    ),
];

static CATALOG: Lazy<Vec<FormSpec>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|entry| entry.build().expect("catalog entries describe valid forms"))
        .collect()
});

impl Entry {
    fn build(&self) -> Result<FormSpec, CoreError> {
        let department = Department::new(self.slug, self.name, self.specialty);
        let mut builder = FormSpec::builder(department).contact_fields();
        for extra in self.extras {
            builder = apply_extra(builder, *extra);
        }
        if !self.scheduled {
            return builder.without_doctor_select().build();
        }
        if let Some(label) = self.doctor_label {
            builder = builder.doctor_label(label);
        }
        builder = builder.doctor_select().appointment_time();
        for (id, name, focus) in self.providers {
            let mut provider = ProviderOption::new(*id, *name);
            if let Some(focus) = focus {
                provider = provider.with_focus(*focus);
            }
            builder = builder.provider(provider);
        }
        builder.build()
    }
}

fn apply_extra(builder: FormSpecBuilder, extra: Extra) -> FormSpecBuilder {
    match extra {
        Extra::Notes(label) => builder.field(
            FieldDescriptor::new(ids::HEALTH_CONCERNS, label, FieldKind::TextArea)
                .with_optional()
                .with_placeholder("Describe your symptoms or condition"),
        ),
        Extra::Address => builder.field(
            FieldDescriptor::new(ids::ADDRESS, "Address", FieldKind::Text)
                .with_placeholder("Enter your address"),
        ),
        Extra::Procedure(label, choices) => builder.procedures(label, choices.iter().copied()),
        Extra::AgeGroup(label, choices) => {
            builder.field(FieldDescriptor::new(ids::AGE, label, select(choices)))
        }
        Extra::AgeText(label) => builder.field(
            FieldDescriptor::new(ids::AGE, label, FieldKind::Text)
                .with_placeholder("Age in years/months"),
        ),
        Extra::FirstVisit => builder.field(FieldDescriptor::new(
            ids::FIRST_VISIT,
            "Are you visiting Evercare for the first time?",
            select(FIRST_VISIT),
        )),
        Extra::DepartmentPicker { medical, surgical } => {
            let grouped = [("medical", medical), ("surgical", surgical)]
                .into_iter()
                .flat_map(|(group, choices)| {
                    choices
                        .iter()
                        .map(move |(value, label)| SelectOption::new(*value, *label).in_group(group))
                })
                .collect();
            builder
                .field(FieldDescriptor::new(
                    ids::SPECIALTY_TYPE,
                    "Specialties",
                    select(SPECIALTIES),
                ))
                .field(
                    FieldDescriptor::new(
                        ids::MEDICAL_DEPARTMENT,
                        "Select Medical Department",
                        FieldKind::Select(grouped),
                    )
                    .with_depends_on(ids::SPECIALTY_TYPE),
                )
        }
    }
}

fn select(choices: &[Choice]) -> FieldKind {
    FieldKind::Select(
        choices
            .iter()
            .map(|(value, label)| SelectOption::new(*value, *label))
            .collect(),
    )
}

/// Every department form, in catalog order.
pub fn all() -> &'static [FormSpec] {
    &CATALOG
}

/// Looks up a form by slug, case-insensitively.
pub fn find(slug: &str) -> Result<&'static FormSpec, CoreError> {
    let needle = slug.trim().to_ascii_lowercase();
    CATALOG
        .iter()
        .find(|spec| spec.slug() == needle)
        .ok_or(CoreError::UnknownDepartment(needle))
}

pub fn slugs() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|spec| spec.slug())
}
