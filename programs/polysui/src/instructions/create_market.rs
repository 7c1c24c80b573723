use crate::config::{NetworkConfig, MAX_OPTIONS, MIN_OPTIONS};
use crate::errors::ValidationError;
use crate::instructions::{CallArg, MoveCall, TransactionRequest};
use crate::require;
use crate::states::{Access, CreateMarketForm, ObjectId};

pub const FUNCTION: &str = "create_market";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMarketArgs {
    pub question: String,
    pub options: Vec<String>,
    pub whitelist: Vec<ObjectId>,
    pub duration_minutes: u64,
    pub whitelist_enabled: bool,
}

impl CreateMarketArgs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let filled = self
            .options
            .iter()
            .filter(|option| !option.trim().is_empty())
            .count();
        require!(filled >= MIN_OPTIONS, ValidationError::TooFewOptions);
        require!(filled == self.options.len(), ValidationError::EmptyOption);
        require!(self.options.len() <= MAX_OPTIONS, ValidationError::TooManyOptions);
        require!(!self.question.trim().is_empty(), ValidationError::EmptyQuestion);
        require!(self.duration_minutes >= 1, ValidationError::InvalidDuration);
        require!(
            !self.whitelist_enabled || !self.whitelist.is_empty(),
            ValidationError::EmptyWhitelist
        );
        Ok(())
    }
}

impl TryFrom<&CreateMarketForm> for CreateMarketArgs {
    type Error = ValidationError;

    fn try_from(form: &CreateMarketForm) -> Result<Self, Self::Error> {
        let options = form.filled_options();
        require!(options.len() >= MIN_OPTIONS, ValidationError::TooFewOptions);
        require!(options.len() <= MAX_OPTIONS, ValidationError::TooManyOptions);

        let question = form.question.trim();
        require!(!question.is_empty(), ValidationError::EmptyQuestion);

        let duration_minutes = form
            .duration_minutes
            .trim()
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidDuration)?;
        require!(duration_minutes >= 1, ValidationError::InvalidDuration);

        let whitelist_enabled = form.access == Access::Whitelist;
        let whitelist = if whitelist_enabled {
            let lines = form.whitelist_lines();
            require!(!lines.is_empty(), ValidationError::EmptyWhitelist);
            lines
                .into_iter()
                .map(|line| {
                    ObjectId::parse(line)
                        .map_err(|_| ValidationError::InvalidWhitelistEntry(line.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        Ok(Self {
            question: question.to_string(),
            options,
            whitelist,
            duration_minutes,
            whitelist_enabled,
        })
    }
}

pub fn handler(cfg: &NetworkConfig, args: CreateMarketArgs) -> Result<TransactionRequest, ValidationError> {
    args.validate()?;

    let call = MoveCall::market(
        cfg.package_id,
        FUNCTION,
        vec![
            CallArg::String(args.question),
            CallArg::StringVector(args.options),
            CallArg::AddressVector(args.whitelist),
            CallArg::U64(args.duration_minutes),
            CallArg::Bool(args.whitelist_enabled),
            CallArg::Object(cfg.clock_id.clone()),
        ],
    );
    Ok(call.into())
}
