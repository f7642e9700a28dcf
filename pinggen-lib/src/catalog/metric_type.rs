use serde::Deserialize;
use strum::{Display, EnumIter, IntoStaticStr};

/// The type tag of a metric, as written in a metrics definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricType {
    Boolean,
    Counter,
    CustomDistribution,
    Datetime,
    Denominator,
    DualLabeledCounter,
    Event,
    Jwe,
    LabeledBoolean,
    LabeledCounter,
    LabeledCustomDistribution,
    LabeledMemoryDistribution,
    LabeledQuantity,
    LabeledString,
    LabeledTimingDistribution,
    MemoryDistribution,
    Object,
    Quantity,
    Rate,
    String,
    StringList,
    Text,
    Timespan,
    TimingDistribution,
    Url,
    Uuid,
}

impl MetricType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// The type of an event's extra key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExtraKeyType {
    #[default]
    String,
    Boolean,
    Quantity,
}
