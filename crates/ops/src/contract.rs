//! Contract handles and factories built from artifacts.

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Function, JsonAbi, Param},
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
};

use crate::{artifacts::Artifact, error::Error};

/// A deployed contract: a name and address joined with the artifact ABI.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    name: String,
    address: Address,
    abi: JsonAbi,
}

impl ContractHandle {
    pub fn new(artifact: Artifact, address: Address) -> Self {
        Self {
            name: artifact.contract_name,
            address,
            abi: artifact.abi,
        }
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// ABI-encode a call to `method`, selector included.
    pub fn encode_call(&self, method: &str, args: &[DynSolValue]) -> Result<Bytes, Error> {
        encode_call(&self.name, &self.abi, method, args)
    }

    /// Build a transaction calling `method` on this contract.
    pub fn call(&self, method: &str, args: &[DynSolValue]) -> Result<TransactionRequest, Error> {
        let input = self.encode_call(method, args)?;
        Ok(TransactionRequest::default()
            .with_to(self.address)
            .with_input(input))
    }
}

/// A deployable contract.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    artifact: Artifact,
}

impl ContractFactory {
    /// Wrap an artifact, rejecting ones without creation bytecode.
    pub fn new(artifact: Artifact) -> Result<Self, Error> {
        if artifact.bytecode.is_empty() {
            return Err(Error::MissingBytecode(artifact.contract_name));
        }
        Ok(Self { artifact })
    }

    pub fn name(&self) -> &str {
        &self.artifact.contract_name
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.artifact.abi
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.artifact.bytecode
    }

    /// Creation code followed by the ABI-encoded constructor arguments.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, Error> {
        let mut code = self.artifact.bytecode.to_vec();
        match &self.artifact.abi.constructor {
            Some(constructor) => {
                if constructor.inputs.len() != args.len() {
                    return Err(self.argument_count("constructor", args.len()));
                }
                let args = coerce_all(&constructor.inputs, args, self.name(), "constructor")?;
                let encoded = constructor.abi_encode_input(&args).map_err(|source| {
                    Error::Encode {
                        contract: self.name().to_string(),
                        method: "constructor".to_string(),
                        source,
                    }
                })?;
                code.extend_from_slice(&encoded);
            }
            None if args.is_empty() => {}
            None => return Err(self.argument_count("constructor", args.len())),
        }
        Ok(code.into())
    }

    /// ABI-encode a call to `method` against this contract's ABI.
    ///
    /// Used for initializer calldata forwarded through a proxy.
    pub fn encode_call(&self, method: &str, args: &[DynSolValue]) -> Result<Bytes, Error> {
        encode_call(self.name(), self.abi(), method, args)
    }

    fn argument_count(&self, method: &str, args: usize) -> Error {
        Error::ArgumentCount {
            contract: self.name().to_string(),
            method: method.to_string(),
            args,
        }
    }
}

fn encode_call(
    contract: &str,
    abi: &JsonAbi,
    method: &str,
    args: &[DynSolValue],
) -> Result<Bytes, Error> {
    let function = select_function(contract, abi, method, args.len())?;
    let args = coerce_all(&function.inputs, args, contract, method)?;
    let encoded = function
        .abi_encode_input(&args)
        .map_err(|source| Error::Encode {
            contract: contract.to_string(),
            method: method.to_string(),
            source,
        })?;
    Ok(encoded.into())
}

/// Pick the overload of `method` taking `args` arguments.
fn select_function<'a>(
    contract: &str,
    abi: &'a JsonAbi,
    method: &str,
    args: usize,
) -> Result<&'a Function, Error> {
    let overloads = abi.function(method).ok_or_else(|| Error::MissingMethod {
        contract: contract.to_string(),
        method: method.to_string(),
    })?;

    let candidates: Vec<&Function> = overloads
        .iter()
        .filter(|function| function.inputs.len() == args)
        .collect();

    match candidates.as_slice() {
        [function] => Ok(function),
        [] => Err(Error::ArgumentCount {
            contract: contract.to_string(),
            method: method.to_string(),
            args,
        }),
        many => Err(Error::AmbiguousOverload {
            contract: contract.to_string(),
            method: method.to_string(),
            args,
            count: many.len(),
        }),
    }
}

fn coerce_all(
    params: &[Param],
    args: &[DynSolValue],
    contract: &str,
    method: &str,
) -> Result<Vec<DynSolValue>, Error> {
    params
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            coerce(param, arg).map_err(|source| Error::Encode {
                contract: contract.to_string(),
                method: method.to_string(),
                source,
            })
        })
        .collect()
}

/// Integers are accepted for any width of the declared type. Range is
/// checked here since the encoder only compares widths.
fn coerce(param: &Param, arg: &DynSolValue) -> alloy::dyn_abi::Result<DynSolValue> {
    let ty: DynSolType = param.resolve()?;
    match (arg, &ty) {
        (DynSolValue::Uint(value, _), DynSolType::Uint(bits)) => {
            if *bits < 256 && value.bit_len() > *bits {
                return Err(alloy::dyn_abi::Error::TypeMismatch {
                    expected: ty.sol_type_name().into_owned(),
                    actual: format!("uint value {value}"),
                });
            }
            Ok(DynSolValue::Uint(*value, *bits))
        }
        (DynSolValue::Int(value, _), DynSolType::Int(bits)) => {
            // Two's complement: -2^(bits-1) ..= 2^(bits-1) - 1.
            let magnitude = if value.is_negative() { !*value } else { *value };
            if *bits < 256 && magnitude.into_raw().bit_len() >= *bits {
                return Err(alloy::dyn_abi::Error::TypeMismatch {
                    expected: ty.sol_type_name().into_owned(),
                    actual: format!("int value {value}"),
                });
            }
            Ok(DynSolValue::Int(*value, *bits))
        }
        _ => Ok(arg.clone()),
    }
}
