/// Majors offered in the search dropdown
pub static MAJORS: &[&str] = &[
    "Accounting", "Actuarial Science", "Advertising", "Aerospace Engineering",
    "African American Studies", "Agriculture", "American Studies", "Animal Science",
    "Anthropology", "Applied Mathematics", "Architecture", "Art & Design",
    "Art History", "Asian Studies", "Astronomy", "Athletic Training",
    "Biochemistry", "Bioengineering", "Biology", "Biomedical Engineering",
    "Biostatistics", "Biotechnology", "Broadcasting", "Business",
    "Business Administration", "Chemical Engineering", "Chemistry",
    "Child Development", "Civil Engineering", "Classics", "Communications",
    "Comparative Literature", "Computer Engineering", "Computer Science",
    "Construction Management", "Creative Writing", "Criminal Justice",
    "Criminology", "Dance", "Data Science", "Dental Hygiene",
    "Dietetics", "Economics", "Education", "Electrical Engineering",
    "Elementary Education", "Engineering", "English", "Entrepreneurship",
    "Environmental Engineering", "Environmental Science", "Exercise Science",
    "Fashion Design", "Film", "Finance", "Food Science",
    "Forensic Science", "French", "Game Design", "Geography",
    "Geology", "German", "Graphic Design", "Health Sciences",
    "Healthcare Administration", "History", "Hospitality Management",
    "Human Resources", "Industrial Design", "Industrial Engineering",
    "Information Systems", "International Business", "International Relations",
    "Journalism", "Kinesiology", "Landscape Architecture", "Latin American Studies",
    "Law (Pre-Law)", "Liberal Arts", "Linguistics", "Management",
    "Marketing", "Mass Communications", "Materials Engineering",
    "Mathematics", "Mechanical Engineering", "Media Studies",
    "Medical Laboratory Science", "Medicine (Pre-Med)", "Music",
    "Music Education", "Neuroscience", "Nursing", "Nutrition",
    "Occupational Therapy", "Organizational Behavior", "Philosophy",
    "Physical Education", "Physical Therapy", "Physics", "Political Science",
    "Psychology", "Public Health", "Public Policy", "Public Relations",
    "Religious Studies", "Respiratory Therapy", "Russian", "Social Work",
    "Sociology", "Software Engineering", "Spanish", "Special Education",
    "Speech Pathology", "Sports Management", "Statistics", "Supply Chain Management",
    "Theater", "Urban Planning", "Veterinary (Pre-Vet)", "Women's Studies",
    "Undecided / General",
];

pub const DEFAULT_SEARCH_LIMIT: usize = 12;

/// Case-insensitive substring search over the major catalog
///
/// A blank query lists the first `limit` majors.
pub fn search_majors(query: &str, limit: usize) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();

    MAJORS
        .iter()
        .copied()
        .filter(|major| needle.is_empty() || major.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
