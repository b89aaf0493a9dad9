use serde::{Deserialize, Serialize};

/// Fixed identifiers for every piece of translatable UI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKey {
    Title,
    FirstName,
    LastName,
    Email,
    Phone,
    CurrentAddress,
    EmploymentStatus,
    MonthlyIncome,
    DesiredMoveInDate,
    NumberOfOccupants,
    CreditScore,
    HasPets,
    PetDetails,
    PetDetailsPlaceholder,
    AdditionalNotes,
    AdditionalNotesPlaceholder,
    Submit,
    SelectStatus,
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
    Retired,
    UseCurrentLocation,
    LocationError,
    SearchAddress,
}

impl LabelKey {
    pub const ALL: [LabelKey; 26] = [
        LabelKey::Title,
        LabelKey::FirstName,
        LabelKey::LastName,
        LabelKey::Email,
        LabelKey::Phone,
        LabelKey::CurrentAddress,
        LabelKey::EmploymentStatus,
        LabelKey::MonthlyIncome,
        LabelKey::DesiredMoveInDate,
        LabelKey::NumberOfOccupants,
        LabelKey::CreditScore,
        LabelKey::HasPets,
        LabelKey::PetDetails,
        LabelKey::PetDetailsPlaceholder,
        LabelKey::AdditionalNotes,
        LabelKey::AdditionalNotesPlaceholder,
        LabelKey::Submit,
        LabelKey::SelectStatus,
        LabelKey::FullTime,
        LabelKey::PartTime,
        LabelKey::SelfEmployed,
        LabelKey::Unemployed,
        LabelKey::Retired,
        LabelKey::UseCurrentLocation,
        LabelKey::LocationError,
        LabelKey::SearchAddress,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            LabelKey::Title => "title",
            LabelKey::FirstName => "firstName",
            LabelKey::LastName => "lastName",
            LabelKey::Email => "email",
            LabelKey::Phone => "phone",
            LabelKey::CurrentAddress => "currentAddress",
            LabelKey::EmploymentStatus => "employmentStatus",
            LabelKey::MonthlyIncome => "monthlyIncome",
            LabelKey::DesiredMoveInDate => "desiredMoveInDate",
            LabelKey::NumberOfOccupants => "numberOfOccupants",
            LabelKey::CreditScore => "creditScore",
            LabelKey::HasPets => "hasPets",
            LabelKey::PetDetails => "petDetails",
            LabelKey::PetDetailsPlaceholder => "petDetailsPlaceholder",
            LabelKey::AdditionalNotes => "additionalNotes",
            LabelKey::AdditionalNotesPlaceholder => "additionalNotesPlaceholder",
            LabelKey::Submit => "submit",
            LabelKey::SelectStatus => "selectStatus",
            LabelKey::FullTime => "fullTime",
            LabelKey::PartTime => "partTime",
            LabelKey::SelfEmployed => "selfEmployed",
            LabelKey::Unemployed => "unemployed",
            LabelKey::Retired => "retired",
            LabelKey::UseCurrentLocation => "useCurrentLocation",
            LabelKey::LocationError => "locationError",
            LabelKey::SearchAddress => "searchAddress",
        }
    }

    /// English text the label is authored in.
    pub const fn source_text(self) -> &'static str {
        match self {
            LabelKey::Title => "Rental Application",
            LabelKey::FirstName => "First Name",
            LabelKey::LastName => "Last Name",
            LabelKey::Email => "Email",
            LabelKey::Phone => "Phone",
            LabelKey::CurrentAddress => "Current Address",
            LabelKey::EmploymentStatus => "Employment Status",
            LabelKey::MonthlyIncome => "Monthly Income",
            LabelKey::DesiredMoveInDate => "Desired Move-in Date",
            LabelKey::NumberOfOccupants => "Number of Occupants",
            LabelKey::CreditScore => "Credit Score",
            LabelKey::HasPets => "Do you have pets?",
            LabelKey::PetDetails => "Pet Details",
            LabelKey::PetDetailsPlaceholder => {
                "Please describe your pets (type, breed, size, etc.)"
            }
            LabelKey::AdditionalNotes => "Additional Notes",
            LabelKey::AdditionalNotesPlaceholder => {
                "Any additional information you'd like to share..."
            }
            LabelKey::Submit => "Submit Application",
            LabelKey::SelectStatus => "Select status",
            LabelKey::FullTime => "Full-time",
            LabelKey::PartTime => "Part-time",
            LabelKey::SelfEmployed => "Self-employed",
            LabelKey::Unemployed => "Unemployed",
            LabelKey::Retired => "Retired",
            LabelKey::UseCurrentLocation => "Use Current Location",
            LabelKey::LocationError => "Could not get your location",
            LabelKey::SearchAddress => "Search for address...",
        }
    }
}
