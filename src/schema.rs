//! Output column definitions
//!
//! A [`Schema`] is the ordered list of fields pulled out of every listing
//! document. Its order is the column order of the result table and of the
//! CSV header.

/// Columns extracted from `propertyDetail.detailBean`, in output order.
pub const PROPERTY_DETAIL_COLUMNS: [&str; 33] = [
    "localityName",
    "landMarks",
    "locality",
    "price",
    "nameOfSociety",
    "projectName",
    "carpetArea",
    "coveredArea",
    "coveredAreaUnit",
    "carpetAreaSqft",
    "possessionStatus",
    "floorNumber",
    "totalFloorNumber",
    "longitude",
    "latitude",
    "transactionType",
    "facing",
    "ownershipType",
    "furnished",
    "bedrooms",
    "bathrooms",
    "numberOfBalconied",
    "propertyType",
    "additionalRooms",
    "ageofcons",
    "isVerified",
    "listingTypeDesc",
    "propertyAmenities",
    "facilitiesDesc",
    "propertyId",
    "url",
    "psmUsp",
    "shortAddress",
];

/// Ordered set of output column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The listing schema: every entry of [`PROPERTY_DETAIL_COLUMNS`]
    pub fn property_detail() -> Self {
        Self::new(PROPERTY_DETAIL_COLUMNS)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in output order
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::property_detail()
    }
}
