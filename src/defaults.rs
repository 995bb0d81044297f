//! Library-wide default settings.
use crate::dtype::DType;
use crate::index_mode::IndexMode;
use crate::order::Order;

/// Default data types by category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultDTypes {
    /// Default for unspecified numeric data.
    pub default: DType,
    pub numeric: DType,
    pub real: DType,
    pub floating_point: DType,
    pub real_floating_point: DType,
    pub complex_floating_point: DType,
    pub integral: DType,
    pub signed_integer: DType,
    pub unsigned_integer: DType,
}

/// Default settings used by constructors and factories when a setting is
/// not supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Defaults {
    pub dtypes: DefaultDTypes,
    pub order: Order,
    pub index_mode: IndexMode,
    pub casting: crate::casting::CastingMode,
}

static DEFAULTS: Defaults = Defaults {
    dtypes: DefaultDTypes {
        default: DType::Float64,
        numeric: DType::Float64,
        real: DType::Float64,
        floating_point: DType::Float64,
        real_floating_point: DType::Float64,
        complex_floating_point: DType::Complex128,
        integral: DType::Int32,
        signed_integer: DType::Int32,
        unsigned_integer: DType::Uint32,
    },
    order: Order::RowMajor,
    index_mode: IndexMode::Throw,
    casting: crate::casting::CastingMode::Safe,
};

/// Return the library defaults.
///
/// ```
/// use ndarray_base::{defaults, Order};
///
/// assert_eq!(defaults().order, Order::RowMajor);
/// ```
pub fn defaults() -> &'static Defaults {
    &DEFAULTS
}
