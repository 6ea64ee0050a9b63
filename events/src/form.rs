//! Registration form: participant choice, contact fields, and at most one
//! game-account question derived from the event's metadata.
//!
//! Validation order is fixed so the shell always surfaces the same first
//! error: player name (when registering someone else), then the account
//! question, then its sub-field. Answering the account question with "no"
//! fails hard; an account is a participation requirement, not a survey.

use playgrid_core::{Effect, Reducer, SmallVec, smallvec};
use playgrid_macros::Action;
use playgrid_storefront::{Attribute, Product};
use thiserror::Error;

/// Who the registration is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Participant {
    /// The buyer themselves (default)
    #[default]
    Slf,
    /// Someone else; requires the player's name
    Other,
}

/// Which game account the event requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Pokémon organized play id
    PokemonId,
    /// Bandai TCG Plus account
    TcgPlus,
    /// MTG Companion app (no sub-field)
    MtgCompanion,
    /// Ravensburger Play Hub account
    PlayHub,
}

impl AccountKind {
    /// Human name used in questions and error messages.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::PokemonId => "Pokémon ID",
            Self::TcgPlus => "TCG Plus",
            Self::MtgCompanion => "MTG Companion App",
            Self::PlayHub => "Ravensburger Play Hub",
        }
    }

    /// Whether a "yes" answer reveals a required sub-field.
    #[must_use]
    pub const fn has_detail(&self) -> bool {
        !matches!(self, Self::MtgCompanion)
    }

    /// Cart attribute key for the yes/no answer.
    #[must_use]
    pub const fn answer_attribute_key(&self) -> &'static str {
        match self {
            Self::PokemonId => "Pokémon ID Account",
            Self::TcgPlus => "TCG Plus Account",
            Self::MtgCompanion => "MTG Companion App",
            Self::PlayHub => "Ravensburger Play Hub Account",
        }
    }

    /// Cart attribute key for the sub-field, when one exists.
    #[must_use]
    pub const fn detail_attribute_key(&self) -> Option<&'static str> {
        match self {
            Self::PokemonId => Some("Pokémon ID"),
            Self::TcgPlus => Some("TCG Plus Username"),
            Self::MtgCompanion => None,
            Self::PlayHub => Some("Ravensburger Play Hub Username"),
        }
    }

    /// The missing-sub-field error message.
    const fn detail_error(&self) -> ValidationError {
        match self {
            Self::PokemonId => ValidationError::MissingPokemonId,
            Self::TcgPlus | Self::PlayHub | Self::MtgCompanion => {
                ValidationError::MissingAccountDetail(*self)
            },
        }
    }
}

/// The pending account question on a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountQuestion {
    /// Which account is being asked about
    pub kind: AccountKind,
    /// Yes/no answer; unanswered blocks submission
    pub answer: Option<bool>,
    /// Sub-field value (id or username)
    pub detail: String,
}

/// Editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Player first name
    FirstName,
    /// Player last name
    LastName,
    /// Contact phone
    Phone,
    /// Date of birth
    Birthday,
    /// The account question's sub-field
    AccountDetail,
}

/// Form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    participant: Participant,
    first_name: String,
    last_name: String,
    phone: String,
    birthday: String,
    account: Option<AccountQuestion>,
}

/// What blocked submission, in the order errors are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Registering someone else without a first name
    #[error("Please enter the player's first name.")]
    MissingFirstName,
    /// Registering someone else without a last name
    #[error("Please enter the player's last name.")]
    MissingLastName,
    /// Account question left unanswered
    #[error("Please indicate if you have a {} account.", .0.display_name())]
    AccountUnanswered(AccountKind),
    /// Answered "no" to a required account
    #[error("An account is required to participate.")]
    AccountDeclined,
    /// Pokémon id sub-field left blank
    #[error("Please enter your Pokémon ID.")]
    MissingPokemonId,
    /// Username sub-field left blank
    #[error("Please enter your {} username.", .0.display_name())]
    MissingAccountDetail(AccountKind),
}

impl FormState {
    /// Derive the form's requirements from the fetched product.
    ///
    /// The game type picks the account question; the partner-TCG flag is
    /// the fallback for games without a dedicated system.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let kind = match product
            .game_type
            .as_deref()
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("pokemon") => Some(AccountKind::PokemonId),
            Some("magic" | "mtg") => Some(AccountKind::MtgCompanion),
            Some("ravensburger" | "lorcana") => Some(AccountKind::PlayHub),
            _ if product.requires_partner_account => Some(AccountKind::TcgPlus),
            _ => None,
        };
        Self {
            account: kind.map(|kind| AccountQuestion {
                kind,
                answer: None,
                detail: String::new(),
            }),
            ..Self::default()
        }
    }

    /// Who the registration is for.
    #[must_use]
    pub const fn participant(&self) -> Participant {
        self.participant
    }

    /// Player name fields are required only when registering someone else.
    #[must_use]
    pub fn requires_player_name(&self) -> bool {
        self.participant == Participant::Other
    }

    /// The account question, if the event has one.
    #[must_use]
    pub const fn account(&self) -> Option<&AccountQuestion> {
        self.account.as_ref()
    }

    /// First and last name joined, trimmed.
    #[must_use]
    pub fn player_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Contact phone as entered.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.trim()
    }

    /// Date of birth as entered.
    #[must_use]
    pub fn birthday(&self) -> &str {
        self.birthday.trim()
    }

    /// First validation failure in fixed order, or `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`]: player name fields when
    /// required, then the account question, then its sub-field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.requires_player_name() {
            if self.first_name.trim().is_empty() {
                return Err(ValidationError::MissingFirstName);
            }
            if self.last_name.trim().is_empty() {
                return Err(ValidationError::MissingLastName);
            }
        }

        if let Some(account) = &self.account {
            match account.answer {
                None => return Err(ValidationError::AccountUnanswered(account.kind)),
                Some(false) => return Err(ValidationError::AccountDeclined),
                Some(true) => {
                    if account.kind.has_detail() && account.detail.trim().is_empty() {
                        return Err(account.kind.detail_error());
                    }
                },
            }
        }

        Ok(())
    }

    /// Cart attributes contributed by the account question.
    #[must_use]
    pub fn account_attributes(&self) -> Vec<Attribute> {
        let Some(account) = &self.account else {
            return Vec::new();
        };
        let Some(answer) = account.answer else {
            return Vec::new();
        };

        let mut attributes = vec![Attribute {
            key: account.kind.answer_attribute_key().to_string(),
            value: if answer { "Yes" } else { "No" }.to_string(),
        }];
        if let Some(key) = account.kind.detail_attribute_key() {
            let detail = account.detail.trim();
            if !detail.is_empty() {
                attributes.push(Attribute {
                    key: key.to_string(),
                    value: detail.to_string(),
                });
            }
        }
        attributes
    }
}

/// Form actions. Pure field edits, no effects.
#[derive(Action, Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Flip the participant radio.
    #[command]
    SetParticipant(Participant),
    /// Edit a field.
    #[command]
    SetField {
        /// Which field
        field: FormField,
        /// New value
        value: String,
    },
    /// Answer the account question.
    #[command]
    AnswerAccount {
        /// Whether the participant has the account
        has_account: bool,
    },
}

/// Reducer over [`FormState`].
pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Action = FormAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FormAction::SetParticipant(participant) => {
                state.participant = participant;
            },
            FormAction::SetField { field, value } => match field {
                FormField::FirstName => state.first_name = value,
                FormField::LastName => state.last_name = value,
                FormField::Phone => state.phone = value,
                FormField::Birthday => state.birthday = value,
                FormField::AccountDetail => {
                    if let Some(account) = &mut state.account {
                        account.detail = value;
                    }
                },
            },
            FormAction::AnswerAccount { has_account } => {
                if let Some(account) = &mut state.account {
                    account.answer = Some(has_account);
                }
            },
        }
        smallvec![]
    }
}
