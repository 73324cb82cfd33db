use crate::core::regions::{DEGREE_ASSOCIATE, OWNERSHIP_PRIVATE_NONPROFIT, OWNERSHIP_PUBLIC};
use crate::models::{CollegeRecord, CommunityCollege, InstitutionType, UserProfile};

/// Check whether a college survives the profile's hard constraints
///
/// This is the categorical pre-filter that runs before scoring. Missing
/// codes never exclude a college: a null degree level is treated as a
/// 4-year school, and a null ownership passes both ownership filters.
#[inline]
pub fn is_eligible(college: &CollegeRecord, profile: &UserProfile) -> bool {
    if profile.community_college == CommunityCollege::No
        && college.predominant_degree == Some(DEGREE_ASSOCIATE)
    {
        return false;
    }

    matches_institution_type(college.ownership, profile.institution_type)
}

/// Ownership check for the institution-type preference
///
/// `Private` admits only private nonprofits (code 2); for-profit schools are
/// excluded along with public ones.
#[inline]
pub fn matches_institution_type(ownership: Option<u8>, preference: InstitutionType) -> bool {
    let Some(code) = ownership else {
        return true;
    };

    match preference {
        InstitutionType::Any => true,
        InstitutionType::Public => code == OWNERSHIP_PUBLIC,
        InstitutionType::Private => code == OWNERSHIP_PRIVATE_NONPROFIT,
    }
}
