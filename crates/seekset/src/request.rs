use crate::{
    error::{ConfigError, PreconditionFailure, constraints, params},
    sort::instruction_property,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Most sort instructions one `pageSort` parameter may carry.
const MAX_SORT_INSTRUCTIONS: usize = 20;

///
/// PageRequest
///
/// Validated pagination parameters for one fetch. The cursor string is
/// decoded and validated by the engine, not here.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_size: u32,
    pub sort: Vec<String>,
    pub cursor: Option<String>,
}

impl PageRequest {
    #[must_use]
    pub fn new(page_size: u32, sort: Vec<String>) -> Self {
        Self {
            page_size,
            sort,
            cursor: None,
        }
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

///
/// PageRequestParser
///
/// Endpoint-scoped parser turning raw query parameters into a validated
/// [`PageRequest`]: page-size bounds, sortable-property allow list, default
/// sort. Built once per endpoint; parse failures are client precondition
/// failures.
///

#[derive(Clone, Debug)]
pub struct PageRequestParser {
    default_page_size: u32,
    min_page_size: u32,
    max_page_size: u32,
    default_sort: Vec<String>,
    sortable_properties: BTreeSet<String>,
}

impl PageRequestParser {
    #[must_use]
    pub fn builder() -> PageRequestParserBuilder {
        PageRequestParserBuilder::default()
    }

    /// Parse request parameters through a lookup closure (absent or empty
    /// parameters fall back to the endpoint defaults).
    pub fn parse<F>(&self, parameter: F) -> Result<PageRequest, PreconditionFailure>
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_size = match parameter(params::PAGE_SIZE).filter(|raw| !raw.is_empty()) {
            None => self.default_page_size,
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                PreconditionFailure::new(params::PAGE_SIZE, constraints::IS_NUMBER, "must be a number")
            })?,
        };
        if page_size < self.min_page_size {
            return Err(PreconditionFailure::new(
                params::PAGE_SIZE,
                constraints::MIN,
                format!("must be at least {}", self.min_page_size),
            ));
        }
        if page_size > self.max_page_size {
            return Err(PreconditionFailure::new(
                params::PAGE_SIZE,
                constraints::MAX,
                format!("must be at most {}", self.max_page_size),
            ));
        }

        let sort = match parameter(params::PAGE_SORT).filter(|raw| !raw.is_empty()) {
            None => self.default_sort.clone(),
            Some(raw) => {
                let mut seen = BTreeSet::new();
                let mut sort = Vec::new();
                for instruction in raw.split(',').take(MAX_SORT_INSTRUCTIONS) {
                    let property = instruction_property(instruction);
                    if !self.sortable_properties.contains(property) {
                        return Err(PreconditionFailure::new(
                            params::PAGE_SORT,
                            constraints::IS_IN,
                            format!("'{property}' is not a sortable property"),
                        ));
                    }
                    // Duplicate instructions collapse, order preserved.
                    if seen.insert(instruction.to_string()) {
                        sort.push(instruction.to_string());
                    }
                }
                sort
            }
        };

        Ok(PageRequest {
            page_size,
            sort,
            cursor: parameter(params::CURSOR).filter(|raw| !raw.is_empty()),
        })
    }
}

///
/// PageRequestParserBuilder
///
/// Bounds must be set explicitly; validation happens at `build`, keeping
/// misconfiguration a setup failure rather than a request failure.
///

#[derive(Clone, Debug, Default)]
pub struct PageRequestParserBuilder {
    default_page_size: u32,
    min_page_size: u32,
    max_page_size: u32,
    default_sort: Vec<String>,
    sortable_properties: BTreeSet<String>,
}

impl PageRequestParserBuilder {
    #[must_use]
    pub const fn page_sizes(mut self, default: u32, min: u32, max: u32) -> Self {
        self.default_page_size = default;
        self.min_page_size = min;
        self.max_page_size = max;
        self
    }

    /// Append one `"[-]property"` instruction to the default sort.
    #[must_use]
    pub fn default_sort(mut self, instruction: impl Into<String>) -> Self {
        self.default_sort.push(instruction.into());
        self
    }

    /// Allow one property name in caller sort instructions.
    #[must_use]
    pub fn sortable_property(mut self, name: impl Into<String>) -> Self {
        self.sortable_properties.insert(name.into());
        self
    }

    pub fn build(self) -> Result<PageRequestParser, ConfigError> {
        if self.min_page_size == 0 {
            return Err(ConfigError::NonPositiveMinPageSize);
        }
        if self.max_page_size < self.min_page_size {
            return Err(ConfigError::PageSizeBoundsInverted {
                min: self.min_page_size,
                max: self.max_page_size,
            });
        }
        if self.default_page_size < self.min_page_size
            || self.default_page_size > self.max_page_size
        {
            return Err(ConfigError::DefaultPageSizeOutOfBounds {
                default: self.default_page_size,
                min: self.min_page_size,
                max: self.max_page_size,
            });
        }
        if self.default_sort.is_empty() {
            return Err(ConfigError::EmptyDefaultSort);
        }

        Ok(PageRequestParser {
            default_page_size: self.default_page_size,
            min_page_size: self.min_page_size,
            max_page_size: self.max_page_size,
            default_sort: self.default_sort,
            sortable_properties: self.sortable_properties,
        })
    }
}
