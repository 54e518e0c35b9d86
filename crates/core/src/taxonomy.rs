// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Documented taxonomy codes and their presentations
//!
//! Records carry short codes (`U`, `E`, `1CV8C`, `_$Session$_.Start`). Each
//! type here keeps the raw code and knows the platform's human-readable
//! label for it. Unknown codes are preserved verbatim.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Transaction state of the record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Committed,
    Canceled,
    NotCompleted,
    #[default]
    NoTransaction,
    Other(String),
}

impl TransactionStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "U" => Self::Committed,
            "C" => Self::Canceled,
            "R" => Self::NotCompleted,
            "N" => Self::NoTransaction,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Committed => "U",
            Self::Canceled => "C",
            Self::NotCompleted => "R",
            Self::NoTransaction => "N",
            Self::Other(code) => code,
        }
    }

    pub fn presentation(&self) -> &str {
        match self {
            Self::Committed => "Зафиксирована",
            Self::Canceled => "Отменена",
            Self::NotCompleted => "Не завершена",
            Self::NoTransaction => "Нет транзакции",
            Self::Other(_) => "",
        }
    }
}

/// Record importance
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Info,
    Error,
    Warning,
    Note,
    Other(String),
}

impl Severity {
    pub fn from_code(code: &str) -> Self {
        match code {
            "I" => Self::Info,
            "E" => Self::Error,
            "W" => Self::Warning,
            "N" => Self::Note,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Info => "I",
            Self::Error => "E",
            Self::Warning => "W",
            Self::Note => "N",
            Self::Other(code) => code,
        }
    }

    pub fn presentation(&self) -> &str {
        match self {
            Self::Info => "Информация",
            Self::Error => "Ошибка",
            Self::Warning => "Предупреждение",
            Self::Note => "Примечание",
            Self::Other(_) => "",
        }
    }
}

/// Kind of client application that produced the record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Application {
    ThickClient,
    ThinClient,
    WebClient,
    Designer,
    ComConnection,
    WsConnection,
    BackgroundJob,
    SystemBackgroundJob,
    ServerConsole,
    ComConsole,
    JobScheduler,
    Debugger,
    AdministrationServer,
    /// No application recorded
    #[default]
    Undefined,
    Other(String),
}

impl Application {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1CV8" => Self::ThickClient,
            "1CV8C" => Self::ThinClient,
            "WebClient" => Self::WebClient,
            "Designer" => Self::Designer,
            "COMConnection" => Self::ComConnection,
            "WSConnection" => Self::WsConnection,
            "BackgroundJob" => Self::BackgroundJob,
            "SystemBackgroundJob" => Self::SystemBackgroundJob,
            "SrvrConsole" => Self::ServerConsole,
            "COMConsole" => Self::ComConsole,
            "JobScheduler" => Self::JobScheduler,
            "Debugger" => Self::Debugger,
            "RAS" => Self::AdministrationServer,
            "" => Self::Undefined,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::ThickClient => "1CV8",
            Self::ThinClient => "1CV8C",
            Self::WebClient => "WebClient",
            Self::Designer => "Designer",
            Self::ComConnection => "COMConnection",
            Self::WsConnection => "WSConnection",
            Self::BackgroundJob => "BackgroundJob",
            Self::SystemBackgroundJob => "SystemBackgroundJob",
            Self::ServerConsole => "SrvrConsole",
            Self::ComConsole => "COMConsole",
            Self::JobScheduler => "JobScheduler",
            Self::Debugger => "Debugger",
            Self::AdministrationServer => "RAS",
            Self::Undefined => "",
            Self::Other(code) => code,
        }
    }

    pub fn presentation(&self) -> &str {
        match self {
            Self::ThickClient => "Толстый клиент",
            Self::ThinClient => "Тонкий клиент",
            Self::WebClient => "Веб-клиент",
            Self::Designer => "Конфигуратор",
            Self::ComConnection => "Внешнее соединение (COM, обычное)",
            Self::WsConnection => "Сессия web-сервиса",
            Self::BackgroundJob => "Фоновое задание",
            Self::SystemBackgroundJob => "Системное фоновое задание",
            Self::ServerConsole => "Консоль кластера",
            Self::ComConsole => "Внешнее соединение (COM, административное)",
            Self::JobScheduler => "Планировщик заданий",
            Self::Debugger => "Отладчик",
            Self::AdministrationServer => "Сервер администрирования",
            Self::Undefined | Self::Other(_) => "Неопределено",
        }
    }
}

/// Event code of the form `Scope.Cause`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(pub String);

impl EventType {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part before the first `.`, or the whole code when there is none
    pub fn scope(&self) -> &str {
        self.split().0
    }

    /// Part after the first `.`, or `""`
    pub fn cause(&self) -> &str {
        self.split().1
    }

    /// Human-readable `Scope.Cause`, falling back to the raw parts
    pub fn presentation(&self) -> String {
        let (scope, cause) = self.split();
        let scope_label = scope_presentation(scope);
        if cause.is_empty() {
            return scope_label.to_string();
        }
        format!("{}.{}", scope_label, cause_presentation(scope, cause))
    }

    fn split(&self) -> (&str, &str) {
        self.0.split_once('.').unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Label for a system scope such as `_$Session$_`; other scopes are returned as is
pub fn scope_presentation(scope: &str) -> &str {
    match scope {
        "_$Undefined$_" => "Неопределено",
        "_$Access$_" => "Доступ",
        "_$Data$_" => "Данные",
        "_$InfoBase$_" => "Информационная база",
        "_$Job$_" => "Фоновое задание",
        "_$OpenIDProvider$_" => "Провайдер OpenID",
        "_$PerformError$_" => "Ошибка выполнения",
        "_$Session$_" => "Сеанс",
        "_$Transaction$_" => "Транзакция",
        "_$User$_" => "Пользователи",
        other => other,
    }
}

/// Label for a system cause within its scope; other causes are returned as is
pub fn cause_presentation<'a>(scope: &str, cause: &'a str) -> &'a str {
    match (scope, cause) {
        ("_$Session$_", "Start") => "Начало",
        ("_$InfoBase$_", "TARImportant") => "Ошибка",
        ("_$InfoBase$_", "TARInfo") => "Сообщение",
        ("_$InfoBase$_", "TARMess") => "Предупреждение",
        (_, cause) => match cause {
            "Access" => "Доступ",
            "AccessDenied" => "Отказ в доступе",
            "Delete" => "Удаление",
            "DeletePredefinedData" => "Удаление предопределенных данных",
            "DeleteVersions" => "Удаление версий",
            "New" => "Добавление",
            "NewPredefinedData" => "Добавление предопределенных данных",
            "NewVersion" => "Добавление версии",
            "Pos" | "Post" => "Проведение",
            "PredefinedDataInitialization" => "Инициализация предопределенных данных",
            "PredefinedDataInitializationDataNotFound" => {
                "Инициализация предопределенных данных. Данные не найдены"
            }
            "SetPredefinedDataInitialization" => {
                "Установка инициализации предопределенных данных"
            }
            "SetStandardODataInterfaceContent" => {
                "Изменение состава стандартного интерфейса OData"
            }
            "TotalsMaxPeriodUpdate" => "Изменение максимального периода рассчитанных итогов",
            "TotalsMinPeriodUpdate" => "Изменение минимального периода рассчитанных итогов",
            "Unpost" => "Отмена проведения",
            "Update" => "Изменение",
            "UpdatePredefinedData" => "Изменение предопределенных данных",
            "VersionCommentUpdate" => "Изменение комментария версии",
            "ConfigExtensionUpdate" | "DBConfigExtensionUpdate" => {
                "Изменение расширения конфигурации"
            }
            "ConfigUpdate" => "Изменение конфигурации",
            "DBConfigBackgroundUpdateCancel" => "Отмена фонового обновления",
            "DBConfigBackgroundUpdateFinish" => "Завершение фонового обновления",
            "DBConfigBackgroundUpdateResume" => {
                "Продолжение (после приостановки) процесса фонового обновления"
            }
            "DBConfigBackgroundUpdateStart" => "Запуск фонового обновления",
            "DBConfigBackgroundUpdateSuspend" => {
                "Приостановка (пауза) процесса фонового обновления"
            }
            "DBConfigExtensionUpdateError" => "Ошибка изменения расширения конфигурации",
            "DBConfigUpdate" => "Изменение конфигурации базы данных",
            "DBConfigUpdateStart" => "Запуск обновления конфигурации базы данных",
            "DumpError" => "Ошибка выгрузки в файл",
            "DumpFinish" => "Окончание выгрузки в файл",
            "DumpStart" => "Начало выгрузки в файл",
            "EraseData" => "Удаление данных информационной базы",
            "EventLogReduce" => "Сокращение журнала регистрации",
            "EventLogReduceError" => "Ошибка сокращения журнала регистрации",
            "EventLogSettingsUpdate" => "Изменение параметров журнала регистрации",
            "EventLogSettingsUpdateError" => {
                "Ошибка при изменении настроек журнала регистрации"
            }
            "InfoBaseAdmParamsUpdate" => "Изменение параметров информационной базы",
            "InfoBaseAdmParamsUpdateError" => {
                "Ошибка изменения параметров информационной базы"
            }
            "IntegrationServiceActiveUpdate" => "Изменение активности сервиса интеграции",
            "IntegrationServiceSettingsUpdate" => "Изменение настроек сервиса интеграции",
            "MasterNodeUpdate" => "Изменение главного узла",
            "PredefinedDataUpdate" => "Обновление предопределенных данных",
            "RegionalSettingsUpdate" => "Изменение региональных установок",
            "RestoreError" => "Ошибка загрузки из файла",
            "RestoreFinish" => "Окончание загрузки из файла",
            "RestoreStart" => "Начало загрузки из файла",
            "SecondFactorAuthTemplateDelete" => {
                "Удаление шаблона второго фактора аутентификации"
            }
            "SecondFactorAuthTemplateNew" => "Добавление шаблона второго фактора аутентификации",
            "SecondFactorAuthTemplateUpdate" => {
                "Изменение шаблона второго фактора аутентификации"
            }
            "SetPredefinedDataUpdate" => "Установить обновление предопределенных данных",
            "Cancel" => "Отмена",
            "Fail" => "Ошибка выполнения",
            "Start" => "Запуск",
            "Succeed" => "Успешное завершение",
            "Terminate" => "Принудительное завершение",
            "NegativeAssertion" => "Отклонено",
            "PositiveAssertion" => "Подтверждено",
            "Authentication" => "Аутентификация",
            "AuthenticationError" => "Ошибка аутентификации",
            "AuthenticationFirstFactor" => "Аутентификация первый фактор",
            "ConfigExtensionApplyError" => "Ошибка применения расширения конфигурации",
            "Finish" => "Завершение",
            "Begin" => "Начало",
            "Commit" => "Фиксация",
            "Rollback" => "Отмена",
            "AuthenticationLock" => "Блокировка аутентификации",
            "AuthenticationUnlock" => "Разблокировка аутентификации",
            "AuthenticationUnlockError" => "Ошибка разблокировки аутентификации",
            "DeleteError" => "Ошибка удаления",
            "UpdateError" => "Ошибка изменения",
            "NewError" => "Ошибка добавления",
            other => other,
        },
    }
}

// Codes travel as their raw string form

macro_rules! code_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = String::deserialize(deserializer)?;
                Ok(Self::from_code(&code))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

code_serde!(TransactionStatus);
code_serde!(Severity);
code_serde!(Application);

#[cfg(test)]
#[path = "taxonomy_tests.rs"]
mod tests;
